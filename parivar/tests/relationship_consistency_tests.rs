//! End-to-end tests for the relationship write path
//!
//! These tests drive the public service API against the in-memory backend
//! and verify the mirror invariant the engine promises.

use parivar::config::ConfigBuilder;
use parivar::models::{Gender, Person};
use parivar::prelude::*;
use parivar::storage::memory::InMemoryStore;

fn service_with_people(people: &[(&str, Gender)]) -> FamilyGraphService {
    let config = ConfigBuilder::testing()
        .build()
        .expect("Failed to build config");
    let service = parivar::init(config).expect("Failed to initialize Parivar");

    let store = service
        .storage()
        .as_any()
        .downcast_ref::<InMemoryStore>()
        .expect("testing config uses the in-memory backend");
    for (id, gender) in people {
        store.put_person(Person::new(*id, *id, "Kumar", *gender));
    }
    service
}

#[tokio::test]
async fn test_create_writes_mirror_with_correct_type() {
    let service = service_with_people(&[("arun", Gender::Male), ("ramesh", Gender::Male)]);

    let edge = service
        .create_relationship(
            NewRelationship::new("arun", "ramesh", RelationType::Father),
            &ActorContext::member("arun"),
        )
        .await
        .expect("Failed to create relationship");
    assert_eq!(edge.relation_type, RelationType::Father);
    assert_eq!(edge.subject.as_ref().unwrap().name, "arun Kumar");

    // Read back from Ramesh's perspective: Arun is his son.
    let edges = service
        .get_relationship_graph("ramesh", false)
        .await
        .expect("Failed to read relationship graph");
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].subject_id, "ramesh");
    assert_eq!(edges[0].object_id, "arun");
    assert_eq!(edges[0].relation_type, RelationType::Son);
    // Member-created facts await approval.
    assert!(!edges[0].is_approved);
}

#[tokio::test]
async fn test_admin_created_edges_are_approved() {
    let service = service_with_people(&[("arun", Gender::Male), ("ramesh", Gender::Male)]);

    service
        .create_relationship(
            NewRelationship::new("arun", "ramesh", RelationType::Father),
            &ActorContext::admin("admin-1"),
        )
        .await
        .expect("Failed to create relationship");

    let edges = service
        .get_relationship_graph("ramesh", false)
        .await
        .unwrap();
    assert!(edges[0].is_approved);
    assert_eq!(edges[0].created_by, "admin-1");
}

#[tokio::test]
async fn test_mirror_invariant_across_taxonomy() {
    // For every label and gender combination: the stored mirror type must
    // equal inverse_of(type, gender of the original subject).
    for relation_type in parivar::relations::ALL_RELATION_TYPES {
        for gender in [Gender::Male, Gender::Female, Gender::Unspecified] {
            let service = service_with_people(&[("subj", gender), ("obj", Gender::Male)]);
            service
                .create_relationship(
                    NewRelationship::new("subj", "obj", *relation_type),
                    &ActorContext::admin("subj"),
                )
                .await
                .unwrap_or_else(|e| panic!("create failed for {relation_type}: {e}"));

            let mirrored = service.get_relationship_graph("obj", false).await.unwrap();
            assert_eq!(
                mirrored[0].relation_type,
                relation_type.inverse_of(gender),
                "mirror mismatch for {relation_type} with subject gender {gender}"
            );
        }
    }
}

#[tokio::test]
async fn test_duplicate_create_returns_existing_edge() {
    let service = service_with_people(&[("arun", Gender::Male), ("ramesh", Gender::Male)]);

    let first = service
        .create_relationship(
            NewRelationship::new("arun", "ramesh", RelationType::Father),
            &ActorContext::member("arun"),
        )
        .await
        .unwrap();

    let err = service
        .create_relationship(
            NewRelationship::new("arun", "ramesh", RelationType::Father),
            &ActorContext::member("arun"),
        )
        .await
        .expect_err("second create must fail");

    match err {
        ParivarError::DuplicateRelationship { existing } => {
            assert_eq!(existing.id, first.id);
            assert_eq!(existing.relation_type, RelationType::Father);
        }
        other => panic!("expected DuplicateRelationship, got {other:?}"),
    }

    // Still exactly one fact (two rows) in the store.
    assert_eq!(service.relationship_count("arun").await.unwrap(), 1);
    assert_eq!(service.relationship_count("ramesh").await.unwrap(), 1);
}

#[tokio::test]
async fn test_update_and_delete_keep_pair_in_sync() {
    let service = service_with_people(&[("arun", Gender::Male), ("divya", Gender::Female)]);
    service
        .create_relationship(
            NewRelationship::new("arun", "divya", RelationType::Sister),
            &ActorContext::admin("arun"),
        )
        .await
        .unwrap();

    service
        .update_relationship(
            "arun",
            "divya",
            RelationType::ElderSister,
            None,
            &ActorContext::admin("arun"),
        )
        .await
        .expect("Failed to update relationship");

    let from_divya = service.get_relationship_graph("divya", false).await.unwrap();
    assert_eq!(from_divya[0].relation_type, RelationType::YoungerBrother);

    service
        .delete_relationship("arun", "divya")
        .await
        .expect("Failed to delete relationship");
    assert_eq!(service.relationship_count("arun").await.unwrap(), 0);
    assert_eq!(service.relationship_count("divya").await.unwrap(), 0);
}

#[tokio::test]
async fn test_approval_applies_to_both_rows() {
    let service = service_with_people(&[("arun", Gender::Male), ("ramesh", Gender::Male)]);
    service
        .create_relationship(
            NewRelationship::new("arun", "ramesh", RelationType::Father),
            &ActorContext::member("arun"),
        )
        .await
        .unwrap();

    // Unapproved facts are invisible to the hierarchy read path.
    let before = service.get_family_hierarchy("arun").await.unwrap();
    assert_eq!(before.metadata.total_members, 1);

    service.approve_relationship("arun", "ramesh").await.unwrap();

    let after = service.get_family_hierarchy("arun").await.unwrap();
    assert_eq!(after.metadata.total_members, 2);
    let from_ramesh = service.get_relationship_graph("ramesh", false).await.unwrap();
    assert!(from_ramesh[0].is_approved);
}

#[tokio::test]
async fn test_self_relationship_rejected_at_service_boundary() {
    let service = service_with_people(&[("arun", Gender::Male)]);
    let err = service
        .create_relationship(
            NewRelationship::new("arun", "arun", RelationType::Cousin),
            &ActorContext::member("arun"),
        )
        .await
        .expect_err("self relationship must fail");
    assert!(matches!(err, ParivarError::SelfRelationship));
}
