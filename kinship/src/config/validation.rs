//! Configuration validation

use super::{models::KinshipConfig, ConfigError, Result};

/// Validate a complete configuration.
pub fn validate_config(config: &KinshipConfig) -> Result<()> {
    if config.tree.max_depth == 0 {
        return Err(ConfigError::ValidationError(
            "tree.max_depth must be at least 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&KinshipConfig::default()).is_ok());
    }

    #[test]
    fn test_zero_depth_rejected() {
        let mut config = KinshipConfig::default();
        config.tree.max_depth = 0;
        assert!(validate_config(&config).is_err());
    }
}
