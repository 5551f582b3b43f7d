//! End-to-end tests for the relationship graph through the Directory facade
//!
//! These tests exercise the full path from validated writes to the
//! derived symmetric view, without touching module internals.

use kinship::prelude::*;

async fn seed_family() -> Directory {
    let directory = init_with_defaults().await.expect("Failed to initialize");

    // Asha's household: father Ravi, mother Meera, brother Kiran,
    // husband Dev
    for (id, name, gender) in [
        (1, "Asha Patil", Gender::Female),
        (2, "Ravi Patil", Gender::Male),
        (3, "Meera Patil", Gender::Female),
        (4, "Kiran Patil", Gender::Male),
        (5, "Dev Kulkarni", Gender::Male),
    ] {
        directory
            .register_member(MemberBuilder::new(name).gender(gender).build(id))
            .await
            .expect("Failed to register member");
    }

    directory.add_relationship(1, 2, "Father").await.unwrap();
    directory.add_relationship(1, 3, "Mother").await.unwrap();
    directory.add_relationship(1, 4, "Brother").await.unwrap();
    directory.add_relationship(1, 5, "Husband").await.unwrap();

    directory
}

#[tokio::test]
async fn test_each_side_sees_the_same_bond() {
    let directory = seed_family().await;

    // Asha entered everything; her view keeps the entered labels
    let from_asha = directory.relationships_of(1).await.unwrap();
    let mut labels: Vec<&str> = from_asha.iter().map(|r| r.label.as_str()).collect();
    labels.sort_unstable();
    assert_eq!(labels, vec!["Brother", "Father", "Husband", "Mother"]);

    // Ravi never entered anything, yet sees Asha as his daughter
    let from_ravi = directory.relationships_of(2).await.unwrap();
    assert_eq!(from_ravi.len(), 1);
    assert_eq!(from_ravi[0].label, "Daughter");
    assert_eq!(from_ravi[0].other_member_id, 1);

    // Dev sees Asha as his wife
    let from_dev = directory.relationships_of(5).await.unwrap();
    assert_eq!(from_dev[0].label, "Wife");
}

#[tokio::test]
async fn test_double_entry_collapses_to_one_bond() {
    let directory = seed_family().await;

    // An operator records the reverse of an existing bond independently
    directory.add_relationship(2, 1, "Daughter").await.unwrap();

    let from_asha = directory.relationships_of(1).await.unwrap();
    let father_count = from_asha.iter().filter(|r| r.label == "Father").count();
    assert_eq!(father_count, 1);

    let from_ravi = directory.relationships_of(2).await.unwrap();
    let daughter_count = from_ravi.iter().filter(|r| r.label == "Daughter").count();
    assert_eq!(daughter_count, 1);
}

#[tokio::test]
async fn test_validation_failures_leave_no_trace() {
    let directory = seed_family().await;
    let before = directory.store().count_relationships(None).await.unwrap();

    assert!(directory.add_relationship(1, 1, "Sister").await.is_err());
    assert!(directory.add_relationship(1, 99, "Sister").await.is_err());
    assert!(directory.add_relationship(1, 2, "Father").await.is_err());
    assert!(directory.add_relationship(1, 2, "Patriarch").await.is_err());

    let after = directory.store().count_relationships(None).await.unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_unknown_gender_yields_generic_label() {
    let directory = init_with_defaults().await.unwrap();
    directory
        .register_member(MemberBuilder::new("Jordan").build(1))
        .await
        .unwrap();
    directory
        .register_member(MemberBuilder::new("Sam").gender(Gender::Male).build(2))
        .await
        .unwrap();

    // Sam is Jordan's father; Jordan's gender was never recorded
    directory.add_relationship(1, 2, "Father").await.unwrap();

    let from_sam = directory.relationships_of(2).await.unwrap();
    assert!(from_sam[0].ambiguous_reciprocal);
    assert_eq!(from_sam[0].label, "Child");
}

#[tokio::test]
async fn test_delete_member_removes_derived_views() {
    let directory = seed_family().await;

    assert!(directory.delete_member(1).await.unwrap());

    // Every bond ran through Asha, so everyone's view is now empty
    for id in [2, 3, 4, 5] {
        assert!(directory.relationships_of(id).await.unwrap().is_empty());
    }
    assert!(directory.get_member(1).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_single_relationship() {
    let directory = seed_family().await;
    let from_asha = directory.relationships_of(1).await.unwrap();
    let husband = from_asha.iter().find(|r| r.label == "Husband").unwrap();

    assert!(directory
        .delete_relationship(&husband.relationship_id)
        .await
        .unwrap());

    let from_dev = directory.relationships_of(5).await.unwrap();
    assert!(from_dev.is_empty());
    assert_eq!(directory.relationships_of(1).await.unwrap().len(), 3);
}
