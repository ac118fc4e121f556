//! Relationship edge data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::PersonSummary;
use crate::relations::taxonomy::RelationType;

/// Maximum accepted length of a relationship description
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// One directed, typed relationship fact between two people
///
/// Reads as "object is `relation_type` of subject". Every complete fact is
/// stored as two rows, this one and its mirror; the consistency manager is
/// the only writer allowed to produce them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationshipEdge {
    /// Unique identifier for the edge
    pub id: String,

    /// Person the fact is recorded from
    pub subject_id: String,

    /// Person the fact points at
    pub object_id: String,

    /// Relation label from the closed vocabulary
    pub relation_type: RelationType,

    /// Free-text note entered alongside the relationship
    pub description: Option<String>,

    /// Whether the counter-party or an administrator has approved this fact;
    /// unapproved edges are excluded from hierarchy traversals
    pub is_approved: bool,

    /// Person id of the creator
    pub created_by: String,

    /// Person id of the last editor
    pub updated_by: String,

    /// When the edge was created
    pub created_at: DateTime<Utc>,

    /// When the edge was last updated
    pub updated_at: DateTime<Utc>,

    /// Subject summary, populated on responses for caller convenience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<PersonSummary>,

    /// Object summary, populated on responses for caller convenience
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<PersonSummary>,
}

impl RelationshipEdge {
    /// Create a fresh edge with generated id and timestamps
    pub fn new(
        subject_id: impl Into<String>,
        object_id: impl Into<String>,
        relation_type: RelationType,
        description: Option<String>,
        is_approved: bool,
        actor_id: impl Into<String>,
    ) -> Self {
        let actor_id = actor_id.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            subject_id: subject_id.into(),
            object_id: object_id.into(),
            relation_type,
            description,
            is_approved,
            created_by: actor_id.clone(),
            updated_by: actor_id,
            created_at: now,
            updated_at: now,
            subject: None,
            object: None,
        }
    }

    /// Get the other person on this edge, if the given person is on it
    pub fn other_person(&self, person_id: &str) -> Option<&str> {
        if self.subject_id == person_id {
            Some(&self.object_id)
        } else if self.object_id == person_id {
            Some(&self.subject_id)
        } else {
            None
        }
    }

    /// Check whether this edge touches the given person
    pub fn involves(&self, person_id: &str) -> bool {
        self.subject_id == person_id || self.object_id == person_id
    }
}

/// Request payload for creating a relationship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRelationship {
    /// Person recording the relationship
    pub subject_id: String,

    /// Person the relationship points at
    pub object_id: String,

    /// Relation label from the closed vocabulary
    pub relation_type: RelationType,

    /// Optional free-text note
    pub description: Option<String>,
}

impl NewRelationship {
    /// Convenience constructor
    pub fn new(
        subject_id: impl Into<String>,
        object_id: impl Into<String>,
        relation_type: RelationType,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            object_id: object_id.into(),
            relation_type,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Identity and privilege of the party performing a write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorContext {
    /// Person id of the acting party
    pub person_id: String,

    /// Whether the actor holds elevated (admin) privilege; admin-created
    /// edges are approved immediately, others await counter-party approval
    pub is_admin: bool,
}

impl ActorContext {
    /// A regular member actor
    pub fn member(person_id: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            is_admin: false,
        }
    }

    /// An administrator actor
    pub fn admin(person_id: impl Into<String>) -> Self {
        Self {
            person_id: person_id.into(),
            is_admin: true,
        }
    }
}
