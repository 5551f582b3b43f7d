//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{models::*, validation, Result};

/// Builder for creating KinshipConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: KinshipConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: KinshipConfig::default(),
        }
    }

    /// Set the maximum tree traversal depth.
    pub fn with_max_tree_depth(mut self, max_depth: u32) -> Self {
        self.config.tree.max_depth = max_depth;
        self
    }

    /// Set the log verbosity level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log output format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<KinshipConfig> {
        validation::validate_config(&self.config)?;
        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
