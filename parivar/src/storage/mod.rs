//! Storage abstractions and implementations
//!
//! This module defines the persistence collaborator contract the engine
//! depends on, plus the in-memory reference backend.
//!
//! ## Storage Implementations
//!
//! - **InMemoryStore**: `RwLock<HashMap>`-backed storage for testing,
//!   development and embedding. The ordered-pair uniqueness constraint the
//!   write path serializes on is enforced here.
//!
//! Production deployments implement [`traits::GraphStore`] against their own
//! database; no schema beyond the models is assumed.

pub mod errors;
pub mod filters;
pub mod memory;
pub mod traits;

use std::sync::Arc;

use crate::config::{GraphStorageType, ParivarConfig};
use errors::StorageError;
use traits::GraphStore;

/// Create a storage backend from configuration
pub fn create_graph_store(config: &ParivarConfig) -> Result<Arc<dyn GraphStore>, StorageError> {
    match config.storage.storage_type {
        GraphStorageType::Memory => Ok(Arc::new(memory::InMemoryStore::new())),
    }
}
