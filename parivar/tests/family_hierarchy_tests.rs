//! End-to-end tests for the hierarchy read path

use parivar::config::ConfigBuilder;
use parivar::models::{Gender, Person};
use parivar::prelude::*;
use parivar::storage::memory::InMemoryStore;

async fn arun_family() -> FamilyGraphService {
    let config = ConfigBuilder::testing()
        .build()
        .expect("Failed to build config");
    let service = parivar::init(config).expect("Failed to initialize Parivar");

    let store = service
        .storage()
        .as_any()
        .downcast_ref::<InMemoryStore>()
        .expect("testing config uses the in-memory backend");
    for (id, first, gender) in [
        ("arun", "Arun", Gender::Male),
        ("ramesh", "Ramesh", Gender::Male),
        ("saroja", "Saroja", Gender::Female),
        ("divya", "Divya", Gender::Female),
        ("priya", "Priya", Gender::Female),
        ("rohan", "Rohan", Gender::Male),
    ] {
        store.put_person(Person::new(id, first, "Kumar", gender));
    }

    let actor = ActorContext::admin("arun");
    for (object, relation_type) in [
        ("ramesh", RelationType::Father),
        ("saroja", RelationType::Mother),
        ("divya", RelationType::Sister),
        ("priya", RelationType::Wife),
        ("rohan", RelationType::Son),
    ] {
        service
            .create_relationship(
                NewRelationship::new("arun", object, relation_type),
                &actor,
            )
            .await
            .expect("Failed to create relationship");
    }
    service
}

#[tokio::test]
async fn test_hierarchy_rooted_at_family_elder() {
    let service = arun_family().await;

    let result = service
        .get_family_hierarchy("arun")
        .await
        .expect("Failed to build hierarchy");

    assert_eq!(result.metadata.total_members, 6);
    assert_eq!(result.metadata.generation_span, 3);

    // The tree starts at a generation -1 member, not at Arun.
    let root = &result.hierarchy;
    assert_eq!(root.generation, -1);
    assert!(
        root.person_id == "ramesh" || root.person_id == "saroja",
        "unexpected root {}",
        root.person_id
    );
    assert_eq!(result.metadata.root_person_name, root.display_name);

    // Arun sits under the root with his spouse attached as an attribute.
    let arun = root
        .children
        .iter()
        .find(|n| n.person_id == "arun")
        .expect("Arun missing from tree");
    assert_eq!(arun.generation, 0);
    assert_eq!(arun.spouse_id.as_deref(), Some("priya"));
    assert_eq!(arun.spouse_name.as_deref(), Some("Priya Kumar"));
    assert_eq!(arun.relation_label.as_deref(), Some("Son"));

    // Divya is grouped beside Arun, and Rohan nests below him.
    assert!(root.children.iter().any(|n| n.person_id == "divya"));
    assert!(arun.children.iter().any(|n| n.person_id == "rohan"));
}

#[tokio::test]
async fn test_component_closure_via_graph_read() {
    let service = arun_family().await;

    let edges = service
        .get_relationship_graph("rohan", true)
        .await
        .expect("Failed to read component edges");

    // Five facts, each stored as two rows.
    assert_eq!(edges.len(), 10);
    // Every edge endpoint belongs to the component discovered from Rohan.
    let members = ["arun", "ramesh", "saroja", "divya", "priya", "rohan"];
    for edge in &edges {
        assert!(members.contains(&edge.subject_id.as_str()));
        assert!(members.contains(&edge.object_id.as_str()));
    }
}

#[tokio::test]
async fn test_subject_only_graph_read() {
    let service = arun_family().await;

    let edges = service
        .get_relationship_graph("rohan", false)
        .await
        .unwrap();
    // Only the single row recorded with Rohan as subject (his mirror row).
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].subject_id, "rohan");
    assert_eq!(edges[0].relation_type, RelationType::Father);
}

#[tokio::test]
async fn test_missing_person_degrades_to_single_node() {
    let config = ConfigBuilder::testing().build().unwrap();
    let service = parivar::init(config).unwrap();

    let result = service
        .get_family_hierarchy("ghost")
        .await
        .expect("read path must not error on unknown people");
    assert_eq!(result.metadata.total_members, 1);
    assert_eq!(result.hierarchy.person_id, "ghost");
    assert!(result.hierarchy.children.is_empty());
}

#[tokio::test]
async fn test_hierarchy_terminates_on_contradictory_cycle() {
    let config = ConfigBuilder::testing().build().unwrap();
    let service = parivar::init(config).unwrap();
    let store = service
        .storage()
        .as_any()
        .downcast_ref::<InMemoryStore>()
        .unwrap();
    for id in ["a", "b", "c"] {
        store.put_person(Person::new(id, id, "X", Gender::Male));
    }

    // A cycle of Father claims: a→b, b→c, c→a. The consistency manager
    // would reject the closing edge as a duplicate only for the same pair,
    // so this contradictory data can genuinely occur.
    let actor = ActorContext::admin("a");
    for (subject, object) in [("a", "b"), ("b", "c"), ("c", "a")] {
        service
            .create_relationship(
                NewRelationship::new(subject, object, RelationType::Father),
                &actor,
            )
            .await
            .unwrap();
    }

    let result = service
        .get_family_hierarchy("a")
        .await
        .expect("cycle must not hang or error");
    assert_eq!(result.metadata.total_members, 3);
    assert!(result.hierarchy.node_count() <= 3);
}
