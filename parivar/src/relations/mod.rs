//! Relationship facts and their consistency management
//!
//! This module owns the closed relation vocabulary, the directed edge
//! entity, and the single write path that keeps every fact's mirror row in
//! sync.

pub mod consistency;
pub mod taxonomy;
pub mod types;

pub use consistency::ConsistencyManager;
pub use taxonomy::{ALL_RELATION_TYPES, RelationCategory, RelationType};
pub use types::{ActorContext, MAX_DESCRIPTION_LEN, NewRelationship, RelationshipEdge};
