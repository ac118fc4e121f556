//! Generation assignment over a discovered component

use std::collections::{HashMap, HashSet, VecDeque};
use tracing::warn;

use crate::hierarchy::FamilySnapshot;

/// Assign an integer generation to every person in the snapshot
///
/// BFS from `root_id` (generation 0) with a single global visited set:
/// each person's generation is fixed exactly once, first assignment wins.
/// A later edge implying a different generation is a data contradiction;
/// the original value is kept and the conflict is logged. People present in
/// the snapshot but unreached by the traversal default to one generation
/// below the root so the hierarchy view degrades instead of omitting them.
pub fn assign_generations(snapshot: &FamilySnapshot, root_id: &str) -> HashMap<String, i32> {
    let mut generations: HashMap<String, i32> = HashMap::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::new();

    generations.insert(root_id.to_string(), 0);
    visited.insert(root_id.to_string());
    queue.push_back(root_id.to_string());

    while let Some(current) = queue.pop_front() {
        let current_generation = generations[&current];

        for edge in snapshot.edges_of(&current) {
            let Some(neighbor) = edge.other_person(&current) else {
                continue;
            };

            // The delta is defined object-relative-to-subject; walking the
            // edge from the object side flips the sign. Mirror rows make
            // both recordings agree for a complete pair.
            let delta = if edge.subject_id == current {
                edge.relation_type.generation_delta()
            } else {
                -edge.relation_type.generation_delta()
            };
            let proposed = current_generation + delta;

            if visited.contains(neighbor) {
                let assigned = generations[neighbor];
                if assigned != proposed {
                    warn!(
                        person = neighbor,
                        assigned,
                        proposed,
                        via_edge = %edge.id,
                        "Contradictory generation implied by edge; keeping first assignment"
                    );
                }
                continue;
            }

            visited.insert(neighbor.to_string());
            generations.insert(neighbor.to_string(), proposed);
            queue.push_back(neighbor.to_string());
        }
    }

    // Graceful fallback for people the traversal never reached.
    for person_id in snapshot.people.keys() {
        generations.entry(person_id.clone()).or_insert(1);
    }

    generations
}

/// Number of distinct generation levels covered by the assignment
pub fn generation_span(generations: &HashMap<String, i32>) -> usize {
    let min = generations.values().min();
    let max = generations.values().max();
    match (min, max) {
        (Some(min), Some(max)) => (max - min + 1) as usize,
        _ => 0,
    }
}
