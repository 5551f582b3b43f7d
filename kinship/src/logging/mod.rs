//! Structured logging infrastructure for Kinship.
//!
//! This module provides a configurable logging system based on the tracing
//! crate, supporting different output formats and log levels.

use crate::config::{LogFormat, LogLevel, LoggingConfig};
use tracing::Level;

/// Error type for logging operations
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// Error parsing log level
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    /// Error in subscriber setup
    #[error("Subscriber error: {0}")]
    SubscriberError(Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for logging operations
pub type Result<T> = std::result::Result<T, LogError>;

/// Initialize the logging system with the given configuration.
///
/// A second call is a no-op once a global subscriber is installed, so
/// embedding applications and tests may initialize freely.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let level = level_for(config.level);

    let result = match config.format {
        LogFormat::Json => init_json_logging(level),
        LogFormat::Compact => init_compact_logging(level),
        LogFormat::Pretty => init_pretty_logging(level),
    };

    // A subscriber installed earlier in the process is not an error
    match result {
        Err(LogError::SubscriberError(_)) => Ok(()),
        other => other,
    }
}

/// Initialize logging with JSON formatting
fn init_json_logging(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .json()
        .with_max_level(level)
        .with_level(true)
        .with_target(true)
        .try_init()
        .map_err(LogError::SubscriberError)
}

/// Initialize logging with compact formatting
fn init_compact_logging(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_level(true)
        .with_target(true)
        .try_init()
        .map_err(LogError::SubscriberError)
}

/// Initialize logging with pretty formatting
fn init_pretty_logging(level: Level) -> Result<()> {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(level)
        .with_level(true)
        .with_target(true)
        .try_init()
        .map_err(LogError::SubscriberError)
}

/// Convert a LogLevel to a tracing::Level.
pub fn level_for(level: LogLevel) -> Level {
    match level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    }
}

/// Parse a log level string into a LogLevel enum.
pub fn parse_log_level(level: &str) -> Result<LogLevel> {
    level
        .parse()
        .map_err(|_| LogError::InvalidLogLevel(level.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("debug").unwrap(), LogLevel::Debug);
        assert_eq!(parse_log_level("WARN").unwrap(), LogLevel::Warn);
        assert!(parse_log_level("loud").is_err());
    }

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default();
        assert!(init(&config).is_ok());
        assert!(init(&config).is_ok());
    }
}
