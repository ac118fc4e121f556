//! Configuration system for Parivar.
//!
//! This module provides a flexible configuration system that supports
//! loading configuration from multiple sources (files, environment
//! variables, etc.) with proper validation and defaults.

mod builder;
mod loader;
mod models;
mod validation;

pub use builder::ConfigBuilder;
pub use loader::ConfigLoader;
pub use models::*;

/// Default configuration file names that the system will look for
pub const DEFAULT_CONFIG_FILES: &[&str] = &[
    "parivar.toml",
    "parivar.yaml",
    "parivar.yml",
    "parivar.json",
    ".parivar/config.toml",
    ".parivar/config.yaml",
    ".parivar/config.yml",
    ".parivar/config.json",
];

/// Environment variable prefix for Parivar configuration
pub const ENV_PREFIX: &str = "PARIVAR_";

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error occurred during file loading
    #[error("Failed to load configuration file: {0}")]
    FileLoadError(String),

    /// Error occurred during validation
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// Error occurred during parsing
    #[error("Configuration parsing error: {0}")]
    ParseError(String),

    /// General error
    #[error("{0}")]
    Other(String),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
