//! Configuration validation.

use super::{ConfigError, Result, models::ParivarConfig};

/// Validate a configuration, returning an error for unusable values.
pub fn validate_config(config: &ParivarConfig) -> Result<()> {
    if config.hierarchy.horizontal_pitch <= 0.0 {
        return Err(ConfigError::ValidationError(
            "hierarchy.horizontal_pitch must be positive".to_string(),
        ));
    }
    if config.hierarchy.vertical_pitch <= 0.0 {
        return Err(ConfigError::ValidationError(
            "hierarchy.vertical_pitch must be positive".to_string(),
        ));
    }

    if let Some(file) = &config.logging.file {
        if file.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.file must not be empty when set".to_string(),
            ));
        }
        if !config.logging.stdout && file.parent().is_none() {
            return Err(ConfigError::ValidationError(
                "logging.file must be a valid path".to_string(),
            ));
        }
    }

    Ok(())
}
