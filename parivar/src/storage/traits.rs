//! Trait definitions for storage components

use async_trait::async_trait;
use std::fmt::Debug;

use crate::models::Person;
use crate::relations::types::RelationshipEdge;
use crate::storage::errors::StorageError;
use crate::storage::filters::{EdgeFilter, PersonFilter};

/// Base trait for all storage implementations
#[async_trait]
pub trait BaseStore: Send + Sync + 'static + Debug {
    /// Check if the store is healthy and available
    async fn health_check(&self) -> Result<bool, StorageError>;

    /// Clear all data in the store
    async fn clear(&self) -> Result<(), StorageError>;

    /// Get metadata about the store
    async fn get_metadata(&self) -> Result<serde_json::Value, StorageError>;

    /// Close connections and release resources
    async fn close(&self) -> Result<(), StorageError>;
}

/// Trait for person lookups
///
/// People are owned by the identity collaborator; this trait only reads.
#[async_trait]
pub trait PersonStore: BaseStore {
    /// Get a person by id
    async fn get_person(&self, id: &str) -> Result<Option<Person>, StorageError>;

    /// List people with optional filtering
    async fn list_persons(
        &self,
        filter: Option<PersonFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<Person>, StorageError>;
}

/// Trait for relationship edge operations
#[async_trait]
pub trait EdgeStore: BaseStore {
    /// Insert a new edge
    ///
    /// Fails with `StorageError::AlreadyExists` when an edge for the same
    /// ordered `(subject_id, object_id)` pair is present. This uniqueness
    /// check is the write path's only serialization point.
    async fn insert_edge(&self, edge: RelationshipEdge) -> Result<RelationshipEdge, StorageError>;

    /// Get an edge by id
    async fn get_edge(&self, id: &str) -> Result<Option<RelationshipEdge>, StorageError>;

    /// Update an existing edge
    async fn update_edge(&self, edge: RelationshipEdge) -> Result<RelationshipEdge, StorageError>;

    /// Delete an edge by id
    async fn delete_edge(&self, id: &str) -> Result<bool, StorageError>;

    /// List edges with optional filtering
    async fn list_edges(
        &self,
        filter: Option<EdgeFilter>,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> Result<Vec<RelationshipEdge>, StorageError>;

    /// Count edges with optional filtering
    async fn count_edges(&self, filter: Option<EdgeFilter>) -> Result<usize, StorageError>;

    /// Get the directed edge from subject to object, if present
    async fn find_edge(
        &self,
        subject_id: &str,
        object_id: &str,
    ) -> Result<Option<RelationshipEdge>, StorageError>;

    /// Get all edges touching a person, in either direction
    async fn edges_for_person(
        &self,
        person_id: &str,
        approved_only: bool,
    ) -> Result<Vec<RelationshipEdge>, StorageError>;
}

/// Combined trait for the full persistence collaborator
#[async_trait]
pub trait GraphStore: PersonStore + EdgeStore {
    /// Clear all data from the storage
    async fn clear_storage(&self) -> Result<(), StorageError>;

    /// Get a reference to the underlying store as Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;
}
