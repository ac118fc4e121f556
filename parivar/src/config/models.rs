//! Configuration model definitions.
//!
//! This module contains the configuration structures for all Parivar
//! components.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for Parivar.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ParivarConfig {
    /// Storage configuration
    pub storage: StorageConfig,

    /// Hierarchy and layout configuration
    pub hierarchy: HierarchyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Configuration for storage components.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Type of graph storage to use
    pub storage_type: GraphStorageType,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: GraphStorageType::Memory,
        }
    }
}

/// Graph storage type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GraphStorageType {
    /// In-memory storage; deployments plug their own `GraphStore`
    /// implementation in directly instead of going through this enum
    Memory,
}

/// Configuration for hierarchy construction and layout projection.
///
/// The pitches are render-space distances between people; they never get
/// persisted, the layout is recomputed per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HierarchyConfig {
    /// Horizontal distance between neighboring people on a level
    pub horizontal_pitch: f32,

    /// Vertical distance between generation levels
    pub vertical_pitch: f32,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            horizontal_pitch: crate::hierarchy::layout::DEFAULT_HORIZONTAL_PITCH,
            vertical_pitch: crate::hierarchy::layout::DEFAULT_VERTICAL_PITCH,
        }
    }
}

/// Log levels for the logging configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level (most verbose)
    Trace,
    /// Debug level
    Debug,
    /// Info level
    Info,
    /// Warning level
    Warn,
    /// Error level (least verbose)
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

/// Log output formats
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line output
    Pretty,
    /// Single-line output
    Compact,
    /// Structured JSON output
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::Compact
    }
}

/// Configuration for the logging system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level to emit
    pub level: LogLevel,

    /// Output format
    pub format: LogFormat,

    /// Optional log file path
    pub file: Option<PathBuf>,

    /// Whether to log to stdout
    pub stdout: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            file: None,
            stdout: true,
        }
    }
}
