//! Component discovery over approved relationship edges

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::Result;
use crate::hierarchy::FamilySnapshot;
use crate::storage::traits::GraphStore;

/// Breadth-first discovery of the family component around a person
///
/// Edges are treated as undirected for reachability: either recording of a
/// fact suffices to discover the neighbor. Only approved edges are walked.
#[derive(Debug)]
pub struct ComponentDiscovery {
    store: Arc<dyn GraphStore>,
}

impl ComponentDiscovery {
    /// Create a new discovery handler over the given store
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Discover the component around `root_id` into an immutable snapshot
    ///
    /// A person id reachable through edges but missing from the identity
    /// store is still traversed; it simply has no profile attached. The
    /// query root itself is included even when it has no edges at all.
    pub async fn discover(&self, root_id: &str) -> Result<FamilySnapshot> {
        let mut snapshot = FamilySnapshot::new(root_id);
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<String> = VecDeque::new();

        visited.insert(root_id.to_string());
        queue.push_back(root_id.to_string());

        while let Some(current) = queue.pop_front() {
            match self.store.get_person(&current).await? {
                Some(person) => {
                    snapshot.people.insert(current.clone(), person);
                }
                None => {
                    warn!(person_id = %current, "Person referenced by edges has no profile");
                }
            }

            let edges = self.store.edges_for_person(&current, true).await?;
            for edge in edges {
                let Some(neighbor) = edge.other_person(&current) else {
                    continue;
                };
                let neighbor = neighbor.to_string();
                snapshot.add_edge(edge);
                if visited.insert(neighbor.clone()) {
                    queue.push_back(neighbor);
                }
            }
        }

        debug!(
            root = root_id,
            members = snapshot.member_count(),
            "Discovered family component"
        );
        Ok(snapshot)
    }

    /// Get access to the underlying storage service
    pub fn store(&self) -> &Arc<dyn GraphStore> {
        &self.store
    }
}

/// People reachable from the snapshot root through its edges
///
/// Pure fixed-point over the snapshot; used to verify the closure property
/// of discovery without touching the store.
pub fn component_members(snapshot: &FamilySnapshot) -> HashSet<String> {
    let mut members: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    members.insert(snapshot.root_id.clone());
    queue.push_back(snapshot.root_id.clone());

    while let Some(current) = queue.pop_front() {
        for edge in snapshot.edges_of(&current) {
            if let Some(neighbor) = edge.other_person(&current)
                && members.insert(neighbor.to_string())
            {
                queue.push_back(neighbor.to_string());
            }
        }
    }

    members
}
