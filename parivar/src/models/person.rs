//! Person model representing a portal member
//!
//! People are owned by the external identity collaborator; the engine only
//! reads them by id and embeds lightweight summaries in its responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Gender of a person, used by the inverse-relation lookup
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Not recorded on the profile
    Unspecified,
}

impl Default for Gender {
    fn default() -> Self {
        Self::Unspecified
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Unspecified => write!(f, "unspecified"),
        }
    }
}

impl Gender {
    /// Convert a profile string to a Gender
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "male" | "m" => Self::Male,
            "female" | "f" => Self::Female,
            _ => Self::Unspecified,
        }
    }
}

/// A portal member, resolved by id from the identity collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Person {
    /// Unique identifier for the person
    pub id: String,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Gender as recorded on the profile
    pub gender: Gender,

    /// Date of birth, if shared
    pub birth_date: Option<NaiveDate>,

    /// Profile picture reference
    pub picture: Option<String>,

    /// Community/cultural attribute, if shared
    pub community: Option<String>,

    /// When the profile was created
    pub created_at: DateTime<Utc>,

    /// When the profile was last updated
    pub updated_at: DateTime<Utc>,
}

impl Person {
    /// Create a person with the minimal attributes the engine cares about
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender,
            birth_date: None,
            picture: None,
            community: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Lightweight summary for embedding in responses
    pub fn summary(&self) -> PersonSummary {
        PersonSummary {
            id: self.id.clone(),
            name: self.display_name(),
            gender: self.gender,
        }
    }
}

/// Minimal person reference embedded in engine responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersonSummary {
    /// Person id
    pub id: String,

    /// Display name
    pub name: String,

    /// Gender
    pub gender: Gender,
}
