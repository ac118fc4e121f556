//! End-to-end tests for the layout projection read path

use parivar::config::ConfigBuilder;
use parivar::models::{Gender, Person};
use parivar::prelude::*;
use parivar::storage::memory::InMemoryStore;

async fn seeded_service(horizontal: f32, vertical: f32) -> FamilyGraphService {
    let config = ConfigBuilder::testing()
        .with_layout_pitches(horizontal, vertical)
        .build()
        .expect("Failed to build config");
    let service = parivar::init(config).expect("Failed to initialize Parivar");

    let store = service
        .storage()
        .as_any()
        .downcast_ref::<InMemoryStore>()
        .expect("testing config uses the in-memory backend");
    for (id, gender) in [
        ("arun", Gender::Male),
        ("priya", Gender::Female),
        ("ramesh", Gender::Male),
        ("rohan", Gender::Male),
    ] {
        store.put_person(Person::new(id, id, "Kumar", gender));
    }

    let actor = ActorContext::admin("arun");
    for (object, relation_type) in [
        ("priya", RelationType::Wife),
        ("ramesh", RelationType::Father),
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
async fn test_layout_uses_configured_pitches() {
    let service = seeded_service(100.0, 80.0).await;

    let layout = service
        .get_family_layout("arun")
        .await
        .expect("Failed to project layout");
    assert_eq!(layout.nodes.len(), 4);

    let node = |id: &str| layout.nodes.iter().find(|n| n.id == id).unwrap();
    // Three levels stacked at the configured vertical pitch.
    assert_eq!(node("ramesh").y, 0.0);
    assert_eq!(node("arun").y, 80.0);
    assert_eq!(node("rohan").y, 160.0);
    // The viewer couple sits side by side at the horizontal pitch.
    assert_eq!((node("priya").x - node("arun").x).abs(), 100.0);
}

#[tokio::test]
async fn test_layout_is_viewer_rooted() {
    let service = seeded_service(100.0, 80.0).await;

    // Projected from Rohan, his grandfather moves two levels up.
    let layout = service.get_family_layout("rohan").await.unwrap();
    let node = |id: &str| layout.nodes.iter().find(|n| n.id == id).unwrap();
    assert_eq!(node("rohan").level, 0);
    assert_eq!(node("arun").level, -1);
    assert_eq!(node("ramesh").level, -2);
}

#[tokio::test]
async fn test_layout_edges_typed_and_deduplicated() {
    let service = seeded_service(100.0, 80.0).await;

    let layout = service.get_family_layout("arun").await.unwrap();
    // Three facts, six stored rows, three rendered edges.
    assert_eq!(layout.edges.len(), 3);

    let spouse_edges: Vec<&TypedEdge> = layout
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::Spouse)
        .collect();
    assert_eq!(spouse_edges.len(), 1);
    assert_eq!(spouse_edges[0].kind.style(), "dashed");

    let parent_child: Vec<&TypedEdge> = layout
        .edges
        .iter()
        .filter(|e| e.kind == EdgeKind::ParentChild)
        .collect();
    assert_eq!(parent_child.len(), 2);
    // Normalized parent→child regardless of which row was stored first.
    assert!(
        parent_child
            .iter()
            .any(|e| e.from == "ramesh" && e.to == "arun")
    );
    assert!(
        parent_child
            .iter()
            .any(|e| e.from == "arun" && e.to == "rohan")
    );
}

#[tokio::test]
async fn test_layout_for_unknown_person_still_renders() {
    let config = ConfigBuilder::testing().build().unwrap();
    let service = parivar::init(config).unwrap();

    let layout = service.get_family_layout("ghost").await.unwrap();
    assert_eq!(layout.nodes.len(), 1);
    assert_eq!(layout.nodes[0].id, "ghost");
    assert!(layout.edges.is_empty());
}
