//! Family hierarchy construction
//!
//! The read path of the engine: discover the connected family component of
//! a person, assign generation levels, and reduce the leveled graph either
//! to a nested display tree or to a flat 2-D layout. Apart from discovery
//! (which walks the store), every pass here is a pure computation over an
//! immutable [`FamilySnapshot`].

pub mod builder;
pub mod discovery;
pub mod generations;
pub mod layout;

pub use builder::HierarchyBuilder;
pub use discovery::ComponentDiscovery;
pub use generations::assign_generations;
pub use layout::{EdgeKind, FamilyLayout, LayoutProjector, PositionedNode, TypedEdge};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{Gender, Person};
use crate::relations::types::RelationshipEdge;

/// Immutable snapshot of one family component
///
/// Produced by [`ComponentDiscovery`]; consumed by the pure generation,
/// hierarchy and layout passes. Each edge is indexed under both of its
/// endpoints, so per-person lookups see both recordings of a fact.
#[derive(Debug, Clone, Default)]
pub struct FamilySnapshot {
    /// Person the snapshot was discovered from
    pub root_id: String,

    /// All people in the component, by id
    pub people: HashMap<String, Person>,

    /// Approved edges touching each person, by person id
    pub edges_by_person: HashMap<String, Vec<RelationshipEdge>>,
}

impl FamilySnapshot {
    /// Create an empty snapshot rooted at the given person
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            root_id: root_id.into(),
            people: HashMap::new(),
            edges_by_person: HashMap::new(),
        }
    }

    /// Edges touching the given person
    pub fn edges_of(&self, person_id: &str) -> &[RelationshipEdge] {
        self.edges_by_person
            .get(person_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every edge in the snapshot exactly once, in deterministic order
    pub fn unique_edges(&self) -> Vec<&RelationshipEdge> {
        let mut seen = std::collections::HashSet::new();
        let mut edges: Vec<&RelationshipEdge> = self
            .edges_by_person
            .values()
            .flatten()
            .filter(|edge| seen.insert(edge.id.as_str()))
            .collect();
        edges.sort_by(|a, b| a.id.cmp(&b.id));
        edges
    }

    /// Index an edge under both of its endpoints
    pub fn add_edge(&mut self, edge: RelationshipEdge) {
        for endpoint in [&edge.subject_id, &edge.object_id] {
            let entries = self.edges_by_person.entry(endpoint.clone()).or_default();
            if !entries.iter().any(|e| e.id == edge.id) {
                entries.push(edge.clone());
            }
        }
    }

    /// Number of people in the component
    pub fn member_count(&self) -> usize {
        self.people.len()
    }
}

/// One node of the nested display tree
///
/// `children` holds genealogical children (including siblings grouped under
/// a shared parent); `sibling_entries` holds siblings attached purely for
/// display when a node is a childless entry point. Strict consumers read
/// `children` only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HierarchyNode {
    /// Person id
    pub person_id: String,

    /// Display name
    pub display_name: String,

    /// Gender
    pub gender: Gender,

    /// Label of the relation that connected this node to its tree parent,
    /// as seen from the parent ("Son", "Daughter", ...); None for the root
    pub relation_label: Option<String>,

    /// Generation level relative to the query root
    pub generation: i32,

    /// Spouse person id, if present in the component
    pub spouse_id: Option<String>,

    /// Spouse display name, if present in the component
    pub spouse_name: Option<String>,

    /// Genealogical children
    pub children: Vec<HierarchyNode>,

    /// Siblings attached for display only (presentation compromise)
    pub sibling_entries: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// Children as rendered, including display-only sibling entries
    pub fn display_children(&self) -> Vec<&HierarchyNode> {
        self.children.iter().chain(self.sibling_entries.iter()).collect()
    }

    /// Total number of nodes in this subtree, display entries included
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .chain(self.sibling_entries.iter())
            .map(HierarchyNode::node_count)
            .sum::<usize>()
    }
}

/// Metadata accompanying a hierarchy response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HierarchyMetadata {
    /// Number of people in the discovered component
    pub total_members: usize,

    /// Number of distinct generation levels
    pub generation_span: usize,

    /// Display name of the tree root (the topmost known ancestor)
    pub root_person_name: String,
}

/// A hierarchy response: the nested tree plus its metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FamilyHierarchy {
    /// Rooted display tree
    pub hierarchy: HierarchyNode,

    /// Component metadata
    pub metadata: HierarchyMetadata,
}
