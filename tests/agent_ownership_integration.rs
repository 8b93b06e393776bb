//! Integration tests for agent ownership defaulting and selection
//!
//! Covers the full form flow: role-based defaults on open, kind switching,
//! search-and-pick, late binding from typed text, and submit-time
//! validation.

use serde_json::json;

use lo_console::identity::IdentityKey;
use lo_console::models::Agent;
use lo_console::ownership::{
    default_owner, Actor, ActorRole, Owner, OwnerCandidate, OwnerKind, OwnerSelection,
    OwnershipError,
};

fn agent(fields: serde_json::Value) -> Agent {
    serde_json::from_value(fields).expect("agent fixture should deserialize")
}

#[test]
fn admin_create_flow_requires_an_explicit_pick() {
    let default = default_owner(&Actor::new(ActorRole::Admin), None, None);
    assert!(default.editable);

    let mut selection = OwnerSelection::new(default);
    assert_eq!(selection.kind(), OwnerKind::Franchise);

    // Submitting untouched fails with the franchise-flavored message.
    assert_eq!(
        selection.resolve(&[]),
        Err(OwnershipError::MissingFranchise)
    );

    selection.choose(&OwnerCandidate::new("F1", "Acme Lending"));
    let owner = selection.resolve(&[]).unwrap();
    assert_eq!(owner, Owner::new(OwnerKind::Franchise, "F1"));
}

#[test]
fn switching_kind_invalidates_the_previous_pick() {
    let mut selection = OwnerSelection::new(default_owner(
        &Actor::new(ActorRole::Admin),
        None,
        None,
    ));
    selection.choose(&OwnerCandidate::new("F1", "Acme Lending"));

    selection.set_kind(OwnerKind::RelationshipManager);
    assert_eq!(
        selection.resolve(&[]),
        Err(OwnershipError::MissingRelationshipManager)
    );

    selection.choose(&OwnerCandidate::new("RM4", "South Region"));
    let owner = selection.resolve(&[]).unwrap();
    assert_eq!(owner, Owner::new(OwnerKind::RelationshipManager, "RM4"));
}

#[test]
fn franchise_user_gets_a_locked_default() {
    let actor = Actor::new(ActorRole::Franchise)
        .with_id(json!("U7"))
        .with_franchise(json!({"_id": "F2", "name": "Sunrise Capital"}));

    let default = default_owner(&actor, None, None);
    assert!(!default.editable);
    assert_eq!(default.owner, Owner::new(OwnerKind::Franchise, "F2"));

    // Edits bounce off; the role default survives to submit.
    let mut selection = OwnerSelection::new(default);
    selection.set_kind(OwnerKind::RelationshipManager);
    selection.choose(&OwnerCandidate::new("RM1", "North Region"));
    assert_eq!(
        selection.resolve(&[]).unwrap(),
        Owner::new(OwnerKind::Franchise, "F2")
    );
}

#[test]
fn relationship_manager_user_owns_new_agents() {
    let actor = Actor::new(ActorRole::RelationshipManager).with_id(json!({"$oid": "RM9"}));
    let default = default_owner(&actor, None, None);

    assert!(!default.editable);
    assert_eq!(
        default.owner,
        Owner::new(OwnerKind::RelationshipManager, "RM9")
    );
}

#[test]
fn fixed_context_beats_role_defaults() {
    let actor = Actor::new(ActorRole::Franchise).with_franchise(json!("F2"));
    let fixed = Owner::new(OwnerKind::RelationshipManager, "RM3");

    let default = default_owner(&actor, None, Some(fixed.clone()));
    assert!(!default.editable);
    assert_eq!(default.owner, fixed);
}

#[test]
fn edit_mode_round_trips_every_ownership_shape() {
    // Discriminated, populated reference.
    let populated = agent(json!({
        "_id": "A1",
        "managedByModel": "RelationshipManager",
        "managedBy": {"_id": "RM7", "name": "North RM"}
    }));
    let default = default_owner(&Actor::new(ActorRole::Admin), Some(&populated), None);
    assert_eq!(
        default.owner,
        Owner::new(OwnerKind::RelationshipManager, "RM7")
    );
    assert!(default.editable);

    // Discriminated, raw id.
    let raw = agent(json!({
        "managedByModel": "Franchise",
        "managedBy": "F5"
    }));
    assert_eq!(
        default_owner(&Actor::new(ActorRole::Admin), Some(&raw), None).owner,
        Owner::new(OwnerKind::Franchise, "F5")
    );

    // Legacy row: no discriminator, franchise-shaped field only.
    let legacy = agent(json!({
        "franchise": {"_id": "F3", "name": "Old Town"}
    }));
    assert_eq!(
        default_owner(&Actor::new(ActorRole::Admin), Some(&legacy), None).owner,
        Owner::new(OwnerKind::Franchise, "F3")
    );
}

#[test]
fn typed_search_text_late_binds_to_a_unique_match() {
    let mut selection = OwnerSelection::new(default_owner(
        &Actor::new(ActorRole::Admin),
        None,
        None,
    ));
    selection.set_search_text("  Sunrise Capital ");

    let candidates = vec![
        OwnerCandidate::new("F1", "Acme Lending"),
        OwnerCandidate::new("F2", "sunrise capital"),
    ];
    let owner = selection.resolve(&candidates).unwrap();
    assert_eq!(owner, Owner::new(OwnerKind::Franchise, "F2"));
}

#[test]
fn ambiguous_or_unmatched_search_text_still_fails_validation() {
    let mut selection = OwnerSelection::new(default_owner(
        &Actor::new(ActorRole::Admin),
        None,
        None,
    ));

    selection.set_search_text("Acme");
    let duplicates = vec![
        OwnerCandidate::new("F1", "Acme"),
        OwnerCandidate::new("F8", "acme"),
    ];
    assert!(selection.resolve(&duplicates).is_err());

    selection.set_search_text("No Such Franchise");
    assert!(selection.resolve(&duplicates).is_err());
}

#[test]
fn unresolved_franchise_actor_fails_with_the_right_field_error() {
    // A franchise session whose own franchise reference is missing: the
    // locked default carries an empty id and must be caught at submit.
    let actor = Actor::new(ActorRole::Franchise);
    let default = default_owner(&actor, None, None);
    assert_eq!(default.owner.id, IdentityKey::empty());

    let selection = OwnerSelection::new(default);
    let err = selection.resolve(&[]).unwrap_err();
    assert_eq!(err, OwnershipError::MissingFranchise);
    assert_eq!(err.field(), "managedBy");
}
