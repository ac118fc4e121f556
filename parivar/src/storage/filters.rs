//! Filter types for storage queries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::relations::taxonomy::RelationType;

/// Filter for relationship edge queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EdgeFilter {
    /// Filter by edge ids
    pub ids: Option<Vec<String>>,

    /// Filter by subject person id
    pub subject_id: Option<String>,

    /// Filter by object person id
    pub object_id: Option<String>,

    /// Filter by relation label
    pub relation_type: Option<RelationType>,

    /// Filter by approval state
    pub is_approved: Option<bool>,

    /// Filter by creation date range
    pub created_after: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

/// Filter for person queries
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PersonFilter {
    /// Filter by person ids
    pub ids: Option<Vec<String>>,

    /// Filter by last name (exact match)
    pub last_name: Option<String>,

    /// Filter by community attribute
    pub community: Option<String>,
}

/// Helper functions for constructing filters
pub mod helpers {
    use super::*;

    /// Edges where the given person is the subject
    pub fn edges_from(subject_id: &str) -> EdgeFilter {
        EdgeFilter {
            subject_id: Some(subject_id.to_string()),
            ..Default::default()
        }
    }

    /// Edges between two specific people, in the given direction
    pub fn edge_between(subject_id: &str, object_id: &str) -> EdgeFilter {
        EdgeFilter {
            subject_id: Some(subject_id.to_string()),
            object_id: Some(object_id.to_string()),
            ..Default::default()
        }
    }

    /// Approved edges only
    pub fn approved() -> EdgeFilter {
        EdgeFilter {
            is_approved: Some(true),
            ..Default::default()
        }
    }
}
