//! Closed vocabulary of relation labels
//!
//! Every label belongs to exactly one category, and the category drives the
//! generation arithmetic used by the hierarchy passes. The inverse lookup is
//! a fixed table keyed on the label and the counter-party's gender, not
//! something derived from the category.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::Gender;

/// Category of a relation label
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationCategory {
    /// One generation up (Father, Mother, grandparents)
    Parent,
    /// One generation down (Son, Daughter, grandchildren)
    Child,
    /// Same generation, married
    Spouse,
    /// Same generation, shared parents
    Sibling,
    /// Extended family (uncles, aunts, nephews, nieces, cousins)
    Extended,
}

/// A relation label from the closed vocabulary
///
/// An edge `(subject, object, label)` reads as "object is `label` of
/// subject": `(Arun, Ramesh, Father)` records that Ramesh is Arun's father.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RelationType {
    Father,
    Mother,
    Grandfather,
    Grandmother,
    Son,
    Daughter,
    Grandson,
    Granddaughter,
    Husband,
    Wife,
    Brother,
    Sister,
    ElderBrother,
    ElderSister,
    YoungerBrother,
    YoungerSister,
    Uncle,
    Aunt,
    Nephew,
    Niece,
    Cousin,
}

/// All labels in the vocabulary, used by totality checks
pub const ALL_RELATION_TYPES: &[RelationType] = &[
    RelationType::Father,
    RelationType::Mother,
    RelationType::Grandfather,
    RelationType::Grandmother,
    RelationType::Son,
    RelationType::Daughter,
    RelationType::Grandson,
    RelationType::Granddaughter,
    RelationType::Husband,
    RelationType::Wife,
    RelationType::Brother,
    RelationType::Sister,
    RelationType::ElderBrother,
    RelationType::ElderSister,
    RelationType::YoungerBrother,
    RelationType::YoungerSister,
    RelationType::Uncle,
    RelationType::Aunt,
    RelationType::Nephew,
    RelationType::Niece,
    RelationType::Cousin,
];

impl RelationType {
    /// Classify this label into its category
    pub fn category(&self) -> RelationCategory {
        match self {
            Self::Father | Self::Mother | Self::Grandfather | Self::Grandmother => {
                RelationCategory::Parent
            }
            Self::Son | Self::Daughter | Self::Grandson | Self::Granddaughter => {
                RelationCategory::Child
            }
            Self::Husband | Self::Wife => RelationCategory::Spouse,
            Self::Brother
            | Self::Sister
            | Self::ElderBrother
            | Self::ElderSister
            | Self::YoungerBrother
            | Self::YoungerSister => RelationCategory::Sibling,
            Self::Uncle | Self::Aunt | Self::Nephew | Self::Niece | Self::Cousin => {
                RelationCategory::Extended
            }
        }
    }

    /// Resolve the mirror label for this relation
    ///
    /// `counter_party_gender` is the gender of the person the mirror edge
    /// will point at, i.e. the subject of the original edge. `Unspecified`
    /// resolves to the masculine form so the table stays total.
    pub fn inverse_of(&self, counter_party_gender: Gender) -> RelationType {
        let female = counter_party_gender == Gender::Female;
        match self {
            // Parent labels invert to child labels gendered by the
            // counter-party; grandparent pairs flip both direction and
            // generation distance.
            Self::Father | Self::Mother => pick(female, Self::Daughter, Self::Son),
            Self::Grandfather | Self::Grandmother => {
                pick(female, Self::Granddaughter, Self::Grandson)
            }
            Self::Son | Self::Daughter => pick(female, Self::Mother, Self::Father),
            Self::Grandson | Self::Granddaughter => {
                pick(female, Self::Grandmother, Self::Grandfather)
            }
            Self::Husband | Self::Wife => pick(female, Self::Wife, Self::Husband),
            Self::Brother | Self::Sister => pick(female, Self::Sister, Self::Brother),
            // Age-qualified siblings: the qualifier flips with direction,
            // the gendered form follows the counter-party.
            Self::ElderBrother | Self::ElderSister => {
                pick(female, Self::YoungerSister, Self::YoungerBrother)
            }
            Self::YoungerBrother | Self::YoungerSister => {
                pick(female, Self::ElderSister, Self::ElderBrother)
            }
            Self::Uncle | Self::Aunt => pick(female, Self::Niece, Self::Nephew),
            Self::Nephew | Self::Niece => pick(female, Self::Aunt, Self::Uncle),
            Self::Cousin => Self::Cousin,
        }
    }

    /// Generation offset of the related person relative to the subject
    pub fn generation_delta(&self) -> i32 {
        match self.category() {
            RelationCategory::Parent => -1,
            RelationCategory::Child => 1,
            RelationCategory::Spouse | RelationCategory::Sibling => 0,
            RelationCategory::Extended => match self {
                Self::Uncle | Self::Aunt => -1,
                Self::Nephew | Self::Niece => 1,
                _ => 0,
            },
        }
    }
}

impl std::fmt::Display for RelationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Father => "Father",
            Self::Mother => "Mother",
            Self::Grandfather => "Grandfather",
            Self::Grandmother => "Grandmother",
            Self::Son => "Son",
            Self::Daughter => "Daughter",
            Self::Grandson => "Grandson",
            Self::Granddaughter => "Granddaughter",
            Self::Husband => "Husband",
            Self::Wife => "Wife",
            Self::Brother => "Brother",
            Self::Sister => "Sister",
            Self::ElderBrother => "Elder Brother",
            Self::ElderSister => "Elder Sister",
            Self::YoungerBrother => "Younger Brother",
            Self::YoungerSister => "Younger Sister",
            Self::Uncle => "Uncle",
            Self::Aunt => "Aunt",
            Self::Nephew => "Nephew",
            Self::Niece => "Niece",
            Self::Cousin => "Cousin",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for RelationType {
    type Err = crate::ParivarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        let relation = match normalized.as_str() {
            "father" => Self::Father,
            "mother" => Self::Mother,
            "grandfather" | "grand father" => Self::Grandfather,
            "grandmother" | "grand mother" => Self::Grandmother,
            "son" => Self::Son,
            "daughter" => Self::Daughter,
            "grandson" | "grand son" => Self::Grandson,
            "granddaughter" | "grand daughter" => Self::Granddaughter,
            "husband" => Self::Husband,
            "wife" => Self::Wife,
            "brother" => Self::Brother,
            "sister" => Self::Sister,
            "elder brother" => Self::ElderBrother,
            "elder sister" => Self::ElderSister,
            "younger brother" => Self::YoungerBrother,
            "younger sister" => Self::YoungerSister,
            "uncle" => Self::Uncle,
            "aunt" => Self::Aunt,
            "nephew" => Self::Nephew,
            "niece" => Self::Niece,
            "cousin" => Self::Cousin,
            _ => {
                return Err(crate::ParivarError::InvalidRelationType {
                    label: s.to_string(),
                });
            }
        };
        Ok(relation)
    }
}

fn pick(female: bool, if_female: RelationType, otherwise: RelationType) -> RelationType {
    if female { if_female } else { otherwise }
}
