//! Configuration builder.
//!
//! This module provides a builder pattern API for creating configurations.

use super::{Result, models::*, validation};
use std::path::Path;

/// Builder for creating ParivarConfig instances.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: ParivarConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            config: ParivarConfig::default(),
        }
    }

    /// Use in-memory storage (good for testing and embedding)
    pub fn with_memory_storage(mut self) -> Self {
        self.config.storage.storage_type = GraphStorageType::Memory;
        self
    }

    /// Set the layout pitches used by the layout projector.
    pub fn with_layout_pitches(mut self, horizontal: f32, vertical: f32) -> Self {
        self.config.hierarchy.horizontal_pitch = horizontal;
        self.config.hierarchy.vertical_pitch = vertical;
        self
    }

    /// Set the log level.
    pub fn with_log_level(mut self, level: LogLevel) -> Self {
        self.config.logging.level = level;
        self
    }

    /// Set the log format.
    pub fn with_log_format(mut self, format: LogFormat) -> Self {
        self.config.logging.format = format;
        self
    }

    /// Configure logging to a file.
    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config.logging.file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Use default logging configuration (stdout at Info level)
    pub fn with_default_logging(mut self) -> Self {
        self.config.logging = LoggingConfig::default();
        self
    }

    /// Create a configuration for development.
    ///
    /// In-memory storage and debug-level logging.
    pub fn development() -> Self {
        Self::new()
            .with_memory_storage()
            .with_log_level(LogLevel::Debug)
    }

    /// Create a configuration for automated testing.
    ///
    /// In-memory storage with logging kept quiet.
    pub fn testing() -> Self {
        Self::new()
            .with_memory_storage()
            .with_log_level(LogLevel::Warn)
    }

    /// Create a fully default configuration suitable for most uses
    pub fn defaults() -> Self {
        Self::new().with_memory_storage().with_default_logging()
    }

    /// Build the configuration, validating it in the process.
    pub fn build(self) -> Result<ParivarConfig> {
        // Validate the configuration
        validation::validate_config(&self.config)?;

        Ok(self.config)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
