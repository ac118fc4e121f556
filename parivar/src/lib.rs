//! # Parivar
//!
//! Relationship graph and family hierarchy engine for community portals,
//! providing consistent storage of pairwise family facts, family component
//! discovery, generation leveling, and hierarchy/layout projection for
//! visualization.
//!
//! ## Quick Start
//!
//! ```rust
//! use parivar::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Initialize with the in-memory reference backend
//!     let service = parivar::init_with_defaults()?;
//!
//!     // Seed people (owned by the identity collaborator in production)
//!     let store = service.storage();
//!     // ... then record facts; the mirror row is written automatically:
//!     // service.create_relationship(
//!     //     NewRelationship::new("arun", "ramesh", RelationType::Father),
//!     //     &ActorContext::member("arun"),
//!     // ).await?;
//!
//!     // Read the family back as a tree or a 2-D layout
//!     let hierarchy = service.get_family_hierarchy("arun").await?;
//!     let layout = service.get_family_layout("arun").await?;
//!     # let _ = (store, hierarchy, layout);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **Write path**: every relationship write goes through the consistency
//!   manager, which derives and writes the mirror row, reconciles
//!   concurrent writers, and compensates on partial failure.
//! - **Read path**: component discovery fetches an immutable snapshot;
//!   generation assignment, hierarchy building and layout projection are
//!   pure computations over it.
//! - **Storage**: an async trait family; any database can implement it,
//!   the crate ships an in-memory reference backend.

pub mod config;
pub mod core;
pub mod hierarchy;
pub mod logging;
pub mod models;
pub mod relations;
pub mod storage;

/// The prelude re-exports commonly used types for convenience
pub mod prelude {
    // Re-export the service facade
    pub use crate::core::FamilyGraphService;

    // Re-export core initialization functions
    pub use crate::{init, init_with_defaults};

    // Re-export config types
    pub use crate::config::{
        ConfigBuilder, GraphStorageType, HierarchyConfig, LogFormat, LogLevel, LoggingConfig,
        ParivarConfig, StorageConfig,
    };

    // Re-export model types
    pub use crate::models::{Gender, Person, PersonSummary};

    // Re-export relationship types
    pub use crate::relations::{
        ActorContext, NewRelationship, RelationCategory, RelationType, RelationshipEdge,
    };

    // Re-export hierarchy types
    pub use crate::hierarchy::{
        EdgeKind, FamilyHierarchy, FamilyLayout, FamilySnapshot, HierarchyNode, PositionedNode,
        TypedEdge,
    };

    // Re-export storage types for advanced usage
    pub use crate::storage::{errors::StorageError, memory::InMemoryStore, traits::GraphStore};

    // Re-export essential result type
    pub use crate::{ParivarError, Result};
}

/// Current library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error type for Parivar operations with helpful recovery suggestions
#[derive(Debug, thiserror::Error)]
pub enum ParivarError {
    /// A relationship must involve two distinct people
    #[error(
        "A person cannot be in a relationship with themselves. Check that subject and object ids differ"
    )]
    SelfRelationship,

    /// A relationship already exists between the pair
    #[error(
        "A relationship already exists between these two people. Re-fetch the existing edge and update it instead of creating a new one"
    )]
    DuplicateRelationship {
        /// The conflicting edge, for client reconciliation
        existing: Box<relations::RelationshipEdge>,
    },

    /// Unknown relation label
    #[error(
        "Unknown relation type '{label}'. Use one of the supported labels such as 'Father', 'Sister' or 'Cousin'"
    )]
    InvalidRelationType {
        /// The rejected label
        label: String,
    },

    /// Person could not be resolved
    #[error("Person '{id}' was not found. Ensure the member profile exists before relating it")]
    PersonNotFound {
        /// The missing person id
        id: String,
    },

    /// Relationship could not be resolved
    #[error("No relationship recorded from '{subject_id}' to '{object_id}'")]
    RelationshipNotFound {
        /// Subject person id
        subject_id: String,
        /// Object person id
        object_id: String,
    },

    /// The mirror row could not be written; the forward row was rolled back
    #[error("Failed to write the mirror relationship: {0}. No partial relationship was kept")]
    MirrorWriteFailure(String),

    /// Malformed input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error during storage operations
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Logging error
    #[error("Logging error: {0}")]
    Logging(#[from] logging::LogError),

    /// Unexpected internal fault
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<config::ConfigError> for ParivarError {
    fn from(err: config::ConfigError) -> Self {
        ParivarError::Configuration(err.to_string())
    }
}

/// Result type for Parivar operations
pub type Result<T> = std::result::Result<T, ParivarError>;

/// Initialize Parivar with default configuration
///
/// Sets up the engine with the in-memory reference backend and default
/// logging, and returns a [`core::FamilyGraphService`] instance.
pub fn init_with_defaults() -> Result<core::FamilyGraphService> {
    let config = config::ConfigBuilder::defaults().build()?;
    init(config)
}

/// Initialize Parivar with the provided configuration
///
/// # Arguments
/// * `config` - The configuration for initializing Parivar
///
/// # Returns
/// A `FamilyGraphService` instance if initialization succeeds
///
/// # Examples
///
/// ```rust
/// use parivar::prelude::*;
///
/// fn example() -> Result<()> {
///     let config = ConfigBuilder::new()
///         .with_memory_storage()
///         .with_log_level(LogLevel::Warn)
///         .build()?;
///
///     let service = parivar::init(config)?;
///     # let _ = service;
///     Ok(())
/// }
/// ```
pub fn init(config: config::ParivarConfig) -> Result<core::FamilyGraphService> {
    // Initialize logging; ignore errors if tracing is already initialized
    let _ = logging::init(&config.logging);

    let storage = storage::create_graph_store(&config)?;

    Ok(core::FamilyGraphService::new(storage, config))
}
