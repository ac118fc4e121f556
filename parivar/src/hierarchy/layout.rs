//! 2-D layout projection for graph-style rendering
//!
//! Unlike the hierarchy builder this produces a flat node/edge list. Levels
//! are recomputed from the viewer, since the visualization is centered on
//! whoever is looking at it, not on the family elder.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::hierarchy::{FamilySnapshot, generations::assign_generations};
use crate::models::Gender;
use crate::relations::taxonomy::RelationCategory;

/// Horizontal distance between neighboring people on a level
pub const DEFAULT_HORIZONTAL_PITCH: f32 = 180.0;

/// Vertical distance between generation levels
pub const DEFAULT_VERTICAL_PITCH: f32 = 120.0;

/// A node with computed screen coordinates
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PositionedNode {
    /// Person id
    pub id: String,

    /// Display name
    pub name: String,

    /// Gender
    pub gender: Gender,

    /// Generation level relative to the viewer
    pub level: i32,

    /// Horizontal position
    pub x: f32,

    /// Vertical position
    pub y: f32,
}

/// Rendering class of a projected edge
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EdgeKind {
    /// Parent to child, drawn solid
    ParentChild,
    /// Between spouses, drawn dashed
    Spouse,
    /// Between siblings on the same level, drawn dotted
    Sibling,
    /// Extended relation, drawn dash-dot; orientation depends on levels
    Extended {
        /// Whether both endpoints sit on the same level
        same_level: bool,
    },
}

impl EdgeKind {
    /// Line style hint for the renderer
    pub fn style(&self) -> &'static str {
        match self {
            Self::ParentChild => "solid",
            Self::Spouse => "dashed",
            Self::Sibling => "dotted",
            Self::Extended { .. } => "dash-dot",
        }
    }

    /// Orientation hint for the renderer
    pub fn orientation(&self) -> &'static str {
        match self {
            Self::ParentChild => "vertical",
            Self::Spouse | Self::Sibling => "horizontal",
            Self::Extended { same_level: true } => "horizontal",
            Self::Extended { same_level: false } => "vertical",
        }
    }
}

/// A typed edge between two positioned nodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TypedEdge {
    /// Source node id (parent for [`EdgeKind::ParentChild`], left-positioned
    /// partner for [`EdgeKind::Spouse`])
    pub from: String,

    /// Target node id
    pub to: String,

    /// Rendering class
    pub kind: EdgeKind,
}

/// The flat layout handed to the rendering collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct FamilyLayout {
    /// Positioned people
    pub nodes: Vec<PositionedNode>,

    /// Typed edges, each emitted exactly once
    pub edges: Vec<TypedEdge>,
}

/// Projects a family snapshot onto 2-D coordinates
#[derive(Debug)]
pub struct LayoutProjector<'a> {
    snapshot: &'a FamilySnapshot,
    horizontal_pitch: f32,
    vertical_pitch: f32,
}

impl<'a> LayoutProjector<'a> {
    /// Create a projector with the default pitches
    pub fn new(snapshot: &'a FamilySnapshot) -> Self {
        Self {
            snapshot,
            horizontal_pitch: DEFAULT_HORIZONTAL_PITCH,
            vertical_pitch: DEFAULT_VERTICAL_PITCH,
        }
    }

    /// Override the layout pitches
    pub fn with_pitches(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_pitch = horizontal;
        self.vertical_pitch = vertical;
        self
    }

    /// Project the snapshot, leveled from the viewer's perspective
    pub fn project(&self, viewer_id: &str) -> FamilyLayout {
        let levels = assign_generations(self.snapshot, viewer_id);

        // People per level, top (lowest generation) first.
        let mut by_level: BTreeMap<i32, Vec<String>> = BTreeMap::new();
        for person_id in self.snapshot.people.keys() {
            let level = levels.get(person_id).copied().unwrap_or(1);
            by_level.entry(level).or_default().push(person_id.clone());
        }
        if self.snapshot.people.is_empty() {
            // Viewer without a profile still gets a node to render.
            by_level.entry(0).or_default().push(viewer_id.to_string());
        }

        let spouse_of = self.spouse_map();
        let siblings_of = self.sibling_map();
        let min_level = by_level.keys().next().copied().unwrap_or(0);

        let mut nodes = Vec::new();
        for (level, members) in &by_level {
            let ordered = self.order_level(viewer_id, members, &levels, &spouse_of, &siblings_of);
            let count = ordered.len();
            for (index, person_id) in ordered.into_iter().enumerate() {
                let x = (index as f32 - (count.saturating_sub(1)) as f32 / 2.0)
                    * self.horizontal_pitch;
                let y = (*level - min_level) as f32 * self.vertical_pitch;
                nodes.push(self.positioned_node(person_id, *level, x, y));
            }
        }

        let edges = self.project_edges(&levels, &nodes);
        FamilyLayout { nodes, edges }
    }

    /// Order one level: the viewer's cluster (viewer + spouse) first, their
    /// siblings to one side, then everyone else with couples kept adjacent.
    fn order_level(
        &self,
        viewer_id: &str,
        members: &[String],
        levels: &HashMap<String, i32>,
        spouse_of: &HashMap<String, String>,
        siblings_of: &HashMap<String, Vec<String>>,
    ) -> Vec<String> {
        let member_set: HashSet<&str> = members.iter().map(String::as_str).collect();
        let mut ordered: Vec<String> = Vec::with_capacity(members.len());
        let mut placed: HashSet<String> = HashSet::new();

        let mut place = |id: &str, ordered: &mut Vec<String>, placed: &mut HashSet<String>| {
            if member_set.contains(id) && placed.insert(id.to_string()) {
                ordered.push(id.to_string());
            }
        };

        // Anchor cluster: the viewer and their spouse, centered first.
        if member_set.contains(viewer_id) {
            place(viewer_id, &mut ordered, &mut placed);
            if let Some(spouse) = spouse_of.get(viewer_id)
                && levels.get(spouse) == levels.get(viewer_id)
            {
                place(spouse, &mut ordered, &mut placed);
            }
            if let Some(siblings) = siblings_of.get(viewer_id) {
                let mut siblings = siblings.clone();
                siblings.sort();
                for sibling in &siblings {
                    place(sibling, &mut ordered, &mut placed);
                }
            }
        }

        // Remaining members in id order, pulling spouses in next to each
        // other as they are encountered.
        let mut rest: Vec<&String> = members.iter().collect();
        rest.sort();
        for person_id in rest {
            place(person_id, &mut ordered, &mut placed);
            if let Some(spouse) = spouse_of.get(person_id) {
                place(spouse, &mut ordered, &mut placed);
            }
        }

        ordered
    }

    /// Emit each fact exactly once, typed for rendering
    fn project_edges(
        &self,
        levels: &HashMap<String, i32>,
        nodes: &[PositionedNode],
    ) -> Vec<TypedEdge> {
        let x_of: HashMap<&str, f32> = nodes.iter().map(|n| (n.id.as_str(), n.x)).collect();
        let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
        let mut edges = Vec::new();

        for edge in self.snapshot.unique_edges() {
            // One key per unordered pair: the mirror row never produces a
            // second rendered edge.
            let key = if edge.subject_id <= edge.object_id {
                (edge.subject_id.clone(), edge.object_id.clone())
            } else {
                (edge.object_id.clone(), edge.subject_id.clone())
            };
            if !seen_pairs.insert(key) {
                continue;
            }

            let subject_level = levels.get(&edge.subject_id).copied().unwrap_or(1);
            let object_level = levels.get(&edge.object_id).copied().unwrap_or(1);

            let typed = match edge.relation_type.category() {
                RelationCategory::Parent => TypedEdge {
                    // Object is the parent on a Parent-category edge.
                    from: edge.object_id.clone(),
                    to: edge.subject_id.clone(),
                    kind: EdgeKind::ParentChild,
                },
                RelationCategory::Child => TypedEdge {
                    from: edge.subject_id.clone(),
                    to: edge.object_id.clone(),
                    kind: EdgeKind::ParentChild,
                },
                RelationCategory::Spouse => {
                    let subject_x = x_of.get(edge.subject_id.as_str()).copied().unwrap_or(0.0);
                    let object_x = x_of.get(edge.object_id.as_str()).copied().unwrap_or(0.0);
                    let (from, to) = if subject_x <= object_x {
                        (edge.subject_id.clone(), edge.object_id.clone())
                    } else {
                        (edge.object_id.clone(), edge.subject_id.clone())
                    };
                    TypedEdge {
                        from,
                        to,
                        kind: EdgeKind::Spouse,
                    }
                }
                RelationCategory::Sibling => TypedEdge {
                    from: edge.subject_id.clone(),
                    to: edge.object_id.clone(),
                    kind: EdgeKind::Sibling,
                },
                RelationCategory::Extended => TypedEdge {
                    from: edge.subject_id.clone(),
                    to: edge.object_id.clone(),
                    kind: EdgeKind::Extended {
                        same_level: subject_level == object_level,
                    },
                },
            };
            edges.push(typed);
        }

        edges
    }

    fn spouse_map(&self) -> HashMap<String, String> {
        let mut spouse_of = HashMap::new();
        for edge in self.snapshot.unique_edges() {
            if edge.relation_type.category() == RelationCategory::Spouse {
                spouse_of
                    .entry(edge.subject_id.clone())
                    .or_insert_with(|| edge.object_id.clone());
                spouse_of
                    .entry(edge.object_id.clone())
                    .or_insert_with(|| edge.subject_id.clone());
            }
        }
        spouse_of
    }

    fn sibling_map(&self) -> HashMap<String, Vec<String>> {
        let mut siblings_of: HashMap<String, Vec<String>> = HashMap::new();
        for edge in self.snapshot.unique_edges() {
            if edge.relation_type.category() == RelationCategory::Sibling {
                for (a, b) in [
                    (&edge.subject_id, &edge.object_id),
                    (&edge.object_id, &edge.subject_id),
                ] {
                    let entries = siblings_of.entry(a.clone()).or_default();
                    if !entries.iter().any(|s| s == b) {
                        entries.push(b.clone());
                    }
                }
            }
        }
        siblings_of
    }

    fn positioned_node(&self, person_id: String, level: i32, x: f32, y: f32) -> PositionedNode {
        let person = self.snapshot.people.get(&person_id);
        PositionedNode {
            name: person
                .map(|p| p.display_name())
                .unwrap_or_else(|| person_id.clone()),
            gender: person.map(|p| p.gender).unwrap_or(Gender::Unspecified),
            id: person_id,
            level,
            x,
            y,
        }
    }
}
