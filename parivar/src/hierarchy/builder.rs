//! Nested hierarchy construction from a leveled family graph

use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::hierarchy::{FamilyHierarchy, FamilySnapshot, HierarchyMetadata, HierarchyNode};
use crate::models::Gender;
use crate::relations::taxonomy::{RelationCategory, RelationType};

/// Builds the rooted display tree for one family component
///
/// The family graph is not guaranteed to be a tree: contradictory entries
/// can introduce cycles. Construction therefore recurses with a per-branch
/// path set — re-entering an ancestor terminates that branch only, leaving
/// sibling branches intact. This is deliberately different from the global
/// visited set the generation assignor uses; the two must not be unified.
#[derive(Debug)]
pub struct HierarchyBuilder<'a> {
    snapshot: &'a FamilySnapshot,
    generations: &'a HashMap<String, i32>,
    children_of: HashMap<String, Vec<String>>,
    siblings_of: HashMap<String, Vec<String>>,
    spouse_of: HashMap<String, String>,
    child_labels: HashMap<(String, String), RelationType>,
}

impl<'a> HierarchyBuilder<'a> {
    /// Prepare adjacency lists from the snapshot's classified edges
    pub fn new(snapshot: &'a FamilySnapshot, generations: &'a HashMap<String, i32>) -> Self {
        let mut children_of: HashMap<String, Vec<String>> = HashMap::new();
        let mut siblings_of: HashMap<String, Vec<String>> = HashMap::new();
        let mut spouse_of: HashMap<String, String> = HashMap::new();
        let mut child_labels: HashMap<(String, String), RelationType> = HashMap::new();

        let mut add_child = |parent: &str, child: &str| {
            let entries = children_of.entry(parent.to_string()).or_default();
            if !entries.iter().any(|c| c == child) {
                entries.push(child.to_string());
            }
        };

        for edge in snapshot.unique_edges() {
            match edge.relation_type.category() {
                // A Child-category edge records the object as the child;
                // the mirror Parent-category edge records the same fact
                // from the other end. Both feed the same adjacency.
                RelationCategory::Child => {
                    add_child(&edge.subject_id, &edge.object_id);
                    child_labels.insert(
                        (edge.subject_id.clone(), edge.object_id.clone()),
                        edge.relation_type,
                    );
                }
                RelationCategory::Parent => {
                    add_child(&edge.object_id, &edge.subject_id);
                }
                RelationCategory::Sibling => {
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
                RelationCategory::Spouse => {
                    spouse_of
                        .entry(edge.subject_id.clone())
                        .or_insert_with(|| edge.object_id.clone());
                    spouse_of
                        .entry(edge.object_id.clone())
                        .or_insert_with(|| edge.subject_id.clone());
                }
                RelationCategory::Extended => {}
            }
        }

        // Deterministic child order: by generation, then id.
        for children in children_of.values_mut() {
            children.sort_by(|a, b| {
                let ga = generations.get(a).copied().unwrap_or(0);
                let gb = generations.get(b).copied().unwrap_or(0);
                ga.cmp(&gb).then_with(|| a.cmp(b))
            });
        }
        for siblings in siblings_of.values_mut() {
            siblings.sort();
        }

        Self {
            snapshot,
            generations,
            children_of,
            siblings_of,
            spouse_of,
            child_labels,
        }
    }

    /// Build the hierarchy, rooted at the topmost known ancestor
    ///
    /// The tree root is the lowest-generation member of the component, not
    /// necessarily the query subject. When the query subject cannot be
    /// resolved at all, a single-node hierarchy is returned instead.
    pub fn build(&self) -> FamilyHierarchy {
        if !self.snapshot.people.contains_key(&self.snapshot.root_id) {
            debug!(
                root = %self.snapshot.root_id,
                "Query root has no profile; degrading to single-node hierarchy"
            );
            return self.single_node_fallback();
        }

        let tree_root = self
            .snapshot
            .people
            .keys()
            .min_by(|a, b| {
                let ga = self.generations.get(*a).copied().unwrap_or(0);
                let gb = self.generations.get(*b).copied().unwrap_or(0);
                ga.cmp(&gb).then_with(|| a.cmp(b))
            })
            .cloned()
            .unwrap_or_else(|| self.snapshot.root_id.clone());

        let mut path: HashSet<String> = HashSet::new();
        let mut placed: HashSet<String> = HashSet::new();
        let mut root_node = self
            .build_node(&tree_root, None, &mut path, &mut placed)
            .unwrap_or_else(|| self.bare_node(&tree_root, None));

        // Presentation compromise: a childless entry point still shows the
        // person's own siblings underneath it. They are genealogically the
        // node's siblings, not children, so they live in a separate field.
        if root_node.children.is_empty()
            && let Some(siblings) = self.siblings_of.get(&tree_root)
        {
            let mut fallback_path: HashSet<String> = HashSet::new();
            fallback_path.insert(tree_root.clone());
            for sibling in siblings {
                if !placed.contains(sibling)
                    && let Some(node) =
                        self.build_node(sibling, Some(&tree_root), &mut fallback_path, &mut placed)
                {
                    root_node.sibling_entries.push(node);
                }
            }
        }

        let component_generations: HashMap<String, i32> = self
            .snapshot
            .people
            .keys()
            .filter_map(|id| self.generations.get(id).map(|g| (id.clone(), *g)))
            .collect();
        let generation_span = super::generations::generation_span(&component_generations);

        FamilyHierarchy {
            metadata: HierarchyMetadata {
                total_members: self.snapshot.member_count(),
                generation_span,
                root_person_name: root_node.display_name.clone(),
            },
            hierarchy: root_node,
        }
    }

    fn build_node(
        &self,
        person_id: &str,
        tree_parent: Option<&str>,
        path: &mut HashSet<String>,
        placed: &mut HashSet<String>,
    ) -> Option<HierarchyNode> {
        // Cycle guard: this branch already passed through the person.
        if !path.insert(person_id.to_string()) {
            return None;
        }
        placed.insert(person_id.to_string());

        let mut node = self.bare_node(person_id, tree_parent);

        let direct_children: Vec<String> = self
            .children_of
            .get(person_id)
            .cloned()
            .unwrap_or_default();

        for child in &direct_children {
            if placed.contains(child) {
                continue;
            }
            if let Some(child_node) = self.build_node(child, Some(person_id), path, placed) {
                node.children.push(child_node);
            }
        }

        // Group full/half siblings of each placed child alongside it under
        // this node, instead of duplicating them under every shared parent.
        for child in &direct_children {
            let Some(siblings) = self.siblings_of.get(child) else {
                continue;
            };
            for sibling in siblings {
                if placed.contains(sibling) {
                    continue;
                }
                if let Some(sibling_node) = self.build_node(sibling, Some(person_id), path, placed)
                {
                    node.children.push(sibling_node);
                }
            }
        }

        path.remove(person_id);
        Some(node)
    }

    fn bare_node(&self, person_id: &str, tree_parent: Option<&str>) -> HierarchyNode {
        let person = self.snapshot.people.get(person_id);
        let display_name = person
            .map(|p| p.display_name())
            .unwrap_or_else(|| person_id.to_string());
        let gender = person.map(|p| p.gender).unwrap_or(Gender::Unspecified);

        let relation_label = tree_parent.and_then(|parent| {
            self.child_labels
                .get(&(parent.to_string(), person_id.to_string()))
                .map(|t| t.to_string())
                .or_else(|| self.sibling_label(parent, person_id))
        });

        let spouse_id = self.spouse_of.get(person_id).cloned();
        let spouse_name = spouse_id.as_ref().map(|id| {
            self.snapshot
                .people
                .get(id)
                .map(|p| p.display_name())
                .unwrap_or_else(|| id.clone())
        });

        HierarchyNode {
            person_id: person_id.to_string(),
            display_name,
            gender,
            relation_label,
            generation: self.generations.get(person_id).copied().unwrap_or(0),
            spouse_id,
            spouse_name,
            children: Vec::new(),
            sibling_entries: Vec::new(),
        }
    }

    /// Label for a node grouped in through a sibling edge
    fn sibling_label(&self, anchor: &str, person_id: &str) -> Option<String> {
        self.snapshot
            .edges_of(anchor)
            .iter()
            .find(|edge| {
                edge.subject_id == anchor
                    && edge.object_id == person_id
                    && edge.relation_type.category() == RelationCategory::Sibling
            })
            .map(|edge| edge.relation_type.to_string())
    }

    fn single_node_fallback(&self) -> FamilyHierarchy {
        let node = self.bare_node(&self.snapshot.root_id, None);
        FamilyHierarchy {
            metadata: HierarchyMetadata {
                total_members: 1,
                generation_span: 1,
                root_person_name: node.display_name.clone(),
            },
            hierarchy: node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::assign_generations;
    use crate::models::Person;
    use crate::relations::types::RelationshipEdge;

    fn snapshot_with(
        root: &str,
        people: &[(&str, Gender)],
        pairs: &[(&str, &str, RelationType, RelationType)],
    ) -> FamilySnapshot {
        let mut snapshot = FamilySnapshot::new(root);
        for (id, gender) in people {
            snapshot
                .people
                .insert(id.to_string(), Person::new(*id, *id, "Kumar", *gender));
        }
        for (a, b, forward, reverse) in pairs {
            snapshot.add_edge(RelationshipEdge::new(*a, *b, *forward, None, true, *a));
            snapshot.add_edge(RelationshipEdge::new(*b, *a, *reverse, None, true, *a));
        }
        snapshot
    }

    fn build(snapshot: &FamilySnapshot) -> FamilyHierarchy {
        let generations = assign_generations(snapshot, &snapshot.root_id);
        HierarchyBuilder::new(snapshot, &generations).build()
    }

    #[test]
    fn test_roots_at_topmost_ancestor() {
        let snapshot = snapshot_with(
            "arun",
            &[
                ("arun", Gender::Male),
                ("ramesh", Gender::Male),
                ("rohan", Gender::Male),
            ],
            &[
                ("arun", "ramesh", RelationType::Father, RelationType::Son),
                ("arun", "rohan", RelationType::Son, RelationType::Father),
            ],
        );

        let result = build(&snapshot);
        // Queried from Arun, but the tree starts at his father.
        assert_eq!(result.hierarchy.person_id, "ramesh");
        assert_eq!(result.hierarchy.children.len(), 1);
        assert_eq!(result.hierarchy.children[0].person_id, "arun");
        assert_eq!(
            result.hierarchy.children[0].relation_label.as_deref(),
            Some("Son")
        );
        assert_eq!(result.hierarchy.children[0].children[0].person_id, "rohan");
        assert_eq!(result.metadata.total_members, 3);
        assert_eq!(result.metadata.generation_span, 3);
        assert_eq!(result.metadata.root_person_name, "ramesh Kumar");
    }

    #[test]
    fn test_siblings_grouped_under_shared_parent() {
        // Divya is recorded as Arun's sister but has no explicit edge to
        // their father; grouping still places her beside Arun.
        let snapshot = snapshot_with(
            "arun",
            &[
                ("arun", Gender::Male),
                ("divya", Gender::Female),
                ("ramesh", Gender::Male),
            ],
            &[
                ("arun", "ramesh", RelationType::Father, RelationType::Son),
                ("arun", "divya", RelationType::Sister, RelationType::Brother),
            ],
        );

        let result = build(&snapshot);
        assert_eq!(result.hierarchy.person_id, "ramesh");
        let child_ids: Vec<&str> = result
            .hierarchy
            .children
            .iter()
            .map(|n| n.person_id.as_str())
            .collect();
        assert_eq!(child_ids, vec!["arun", "divya"]);
        // Divya appears once, not duplicated anywhere in the tree.
        assert_eq!(result.hierarchy.node_count(), 3);
    }

    #[test]
    fn test_spouse_attached_as_attribute() {
        let snapshot = snapshot_with(
            "arun",
            &[("arun", Gender::Male), ("priya", Gender::Female)],
            &[("arun", "priya", RelationType::Wife, RelationType::Husband)],
        );

        let result = build(&snapshot);
        let root = &result.hierarchy;
        // Spouses do not become tree edges.
        assert!(root.children.is_empty());
        let spouse_pair = (root.person_id.as_str(), root.spouse_id.as_deref());
        assert!(
            spouse_pair == ("arun", Some("priya")) || spouse_pair == ("priya", Some("arun")),
            "unexpected spouse pairing: {:?}",
            spouse_pair
        );
    }

    #[test]
    fn test_childless_entry_point_shows_siblings() {
        let snapshot = snapshot_with(
            "arun",
            &[("arun", Gender::Male), ("divya", Gender::Female)],
            &[("arun", "divya", RelationType::Sister, RelationType::Brother)],
        );

        let result = build(&snapshot);
        assert!(result.hierarchy.children.is_empty());
        assert_eq!(result.hierarchy.sibling_entries.len(), 1);
        assert_eq!(result.hierarchy.sibling_entries[0].person_id, "divya");
        // The display view includes them; the strict view does not.
        assert_eq!(result.hierarchy.display_children().len(), 1);
    }

    #[test]
    fn test_terminates_on_parent_cycle() {
        // Contradictory data: A→B Father, B→C Father, C→A Father.
        let mut snapshot = FamilySnapshot::new("a");
        for id in ["a", "b", "c"] {
            snapshot
                .people
                .insert(id.to_string(), Person::new(id, id, "X", Gender::Male));
        }
        for (s, o) in [("a", "b"), ("b", "c"), ("c", "a")] {
            snapshot.add_edge(RelationshipEdge::new(s, o, RelationType::Father, None, true, s));
        }

        let generations = assign_generations(&snapshot, "a");
        let result = HierarchyBuilder::new(&snapshot, &generations).build();

        // Must terminate with a finite tree; placement is
        // implementation-defined.
        assert!(result.hierarchy.node_count() <= 3);
        assert_eq!(result.metadata.total_members, 3);
    }

    #[test]
    fn test_missing_root_degrades_to_single_node() {
        // No profile for the query subject at all.
        let snapshot = FamilySnapshot::new("ghost");
        let generations = assign_generations(&snapshot, "ghost");
        let result = HierarchyBuilder::new(&snapshot, &generations).build();

        assert_eq!(result.metadata.total_members, 1);
        assert_eq!(result.hierarchy.person_id, "ghost");
        assert!(result.hierarchy.children.is_empty());
    }
}
