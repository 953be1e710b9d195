use std::sync::Arc;

use reactions_kernel::{
    Address, FreeTextValueParams, KeeperError, Policy, Reaction, ReactionValue,
    RegisteredReactionValueParams, Subspace, SubspaceReactionsParams, SubspacesHooks,
};
use reactions_testkit::fixtures::{author, hello_reaction, other, owner, registered_value_reaction};
use reactions_testkit::{HookEvent, RecordingHooks, TestChain};

mod helpers;
use helpers::{init_logging, seeded_chain};

/// A registered reaction is readable after save; the subspace counter appears only once the
/// subspace hook runs.
#[test]
fn registered_reaction_and_counter_initialization() {
    init_logging();
    let chain = TestChain::new();
    chain.subspaces.insert(Subspace {
        id: 1,
        name: "test".into(),
        owner: owner(),
    });
    let keeper = &chain.keeper;

    keeper.save_registered_reaction(&hello_reaction(1, 1)).unwrap();
    assert_eq!(
        keeper.get_registered_reaction(1, 1).unwrap(),
        Some(hello_reaction(1, 1))
    );

    assert!(!keeper.has_next_registered_reaction_id(1).unwrap());
    assert!(matches!(
        keeper.get_next_registered_reaction_id(1),
        Err(KeeperError::NotInitialized(_))
    ));

    keeper.after_subspace_saved(1).unwrap();
    assert_eq!(keeper.get_next_registered_reaction_id(1).unwrap(), 1);
}

#[test]
fn counter_delete_is_idempotent() {
    let chain = seeded_chain();
    let keeper = &chain.keeper;

    keeper.set_next_reaction_id(1, 1, 9).unwrap();
    assert_eq!(keeper.get_next_reaction_id(1, 1).unwrap(), 9);

    keeper.delete_next_reaction_id(1, 1).unwrap();
    keeper.delete_next_reaction_id(1, 1).unwrap();
    assert!(!keeper.has_next_reaction_id(1, 1).unwrap());
    assert!(matches!(
        keeper.get_next_reaction_id(1, 1),
        Err(KeeperError::NotInitialized(_))
    ));
}

/// Deleting a registered reaction removes every reaction in the subspace that references it.
#[test]
fn delete_registered_reaction_cascades_to_reactions() {
    let chain = seeded_chain();
    let keeper = &chain.keeper;

    keeper.save_registered_reaction(&hello_reaction(1, 1)).unwrap();
    keeper.save_registered_reaction(&hello_reaction(1, 2)).unwrap();
    keeper.save_registered_reaction(&hello_reaction(2, 1)).unwrap();

    keeper
        .save_reaction(&registered_value_reaction(1, 1, 1, 1, &author()))
        .unwrap();
    keeper
        .save_reaction(&registered_value_reaction(1, 1, 2, 2, &author()))
        .unwrap();
    keeper
        .save_reaction(&registered_value_reaction(1, 2, 1, 1, &other()))
        .unwrap();
    keeper
        .save_reaction(&registered_value_reaction(2, 1, 1, 1, &author()))
        .unwrap();

    keeper.delete_registered_reaction(1, 1).unwrap();

    assert!(!keeper.has_registered_reaction(1, 1).unwrap());
    assert_eq!(
        keeper.get_subspace_reactions(1).unwrap(),
        vec![registered_value_reaction(1, 1, 2, 2, &author())]
    );
    // other subspaces are untouched
    assert!(keeper.has_registered_reaction(2, 1).unwrap());
    assert!(keeper.has_reaction(2, 1, 1).unwrap());
}

#[test]
fn has_reacted_compares_author_and_value_variant() {
    let chain = seeded_chain();
    let keeper = &chain.keeper;
    keeper
        .save_reaction(&registered_value_reaction(1, 1, 1, 1, &author()))
        .unwrap();

    let registered = ReactionValue::registered(1);
    assert!(keeper.has_reacted(1, 1, &author(), &registered).unwrap());
    assert!(
        !keeper
            .has_reacted(1, 1, &author(), &ReactionValue::free_text("1"))
            .unwrap()
    );
    assert!(!keeper.has_reacted(1, 1, &other(), &registered).unwrap());
    assert!(!keeper.has_reacted(1, 2, &author(), &registered).unwrap());
}

#[test]
fn post_reactions_come_back_in_id_order() {
    let chain = seeded_chain();
    let keeper = &chain.keeper;
    for id in [10, 2, 1, 256] {
        keeper
            .save_reaction(&Reaction::new(
                1,
                1,
                id,
                ReactionValue::free_text(format!("{id}")),
                author(),
            ))
            .unwrap();
    }
    let ids: Vec<u32> = keeper
        .get_post_reactions(1, 1)
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 10, 256]);
}

#[test]
fn validate_reaction_checks_registered_policy() {
    let chain = seeded_chain();
    let keeper = &chain.keeper;
    let reaction = registered_value_reaction(1, 1, 1, 1, &author());

    let err = keeper.validate_reaction(&reaction).unwrap_err();
    assert!(matches!(
        err,
        KeeperError::PolicyViolation(Policy::UnknownRegisteredReaction { subspace_id: 1, id: 1 })
    ));

    keeper.save_registered_reaction(&hello_reaction(1, 1)).unwrap();
    keeper.validate_reaction(&reaction).unwrap();

    keeper
        .save_subspace_reactions_params(&SubspaceReactionsParams::new(
            1,
            RegisteredReactionValueParams { enabled: false },
            FreeTextValueParams::new(true, 2, ""),
        ))
        .unwrap();
    assert!(matches!(
        keeper.validate_reaction(&reaction),
        Err(KeeperError::PolicyViolation(Policy::RegisteredReactionsDisabled(1)))
    ));
}

#[test]
fn validate_reaction_checks_free_text_policy() {
    let chain = seeded_chain();
    let keeper = &chain.keeper;
    let free_text = |text: &str| Reaction::new(1, 1, 1, ReactionValue::free_text(text), author());

    keeper.validate_reaction(&free_text("hi")).unwrap();
    // two bytes
    keeper.validate_reaction(&free_text("é")).unwrap();
    assert!(matches!(
        keeper.validate_reaction(&free_text("hey")),
        Err(KeeperError::PolicyViolation(Policy::FreeTextTooLong { len: 3, max: 2 }))
    ));
    assert!(matches!(
        keeper.validate_reaction(&free_text("éé")),
        Err(KeeperError::PolicyViolation(Policy::FreeTextTooLong { len: 4, max: 2 }))
    ));

    keeper
        .save_subspace_reactions_params(&SubspaceReactionsParams::new(
            1,
            RegisteredReactionValueParams { enabled: true },
            FreeTextValueParams::new(true, 10, "^[a-z]+$"),
        ))
        .unwrap();
    keeper.validate_reaction(&free_text("abc")).unwrap();
    assert!(matches!(
        keeper.validate_reaction(&free_text("ab1")),
        Err(KeeperError::PolicyViolation(Policy::FreeTextRegexMismatch { .. }))
    ));

    keeper
        .save_subspace_reactions_params(&SubspaceReactionsParams::new(
            1,
            RegisteredReactionValueParams { enabled: true },
            FreeTextValueParams::new(false, 10, ""),
        ))
        .unwrap();
    assert!(matches!(
        keeper.validate_reaction(&free_text("abc")),
        Err(KeeperError::PolicyViolation(Policy::FreeTextDisabled(1)))
    ));
}

/// Structural errors are reported before the subspace policy is consulted.
#[test]
fn validate_reaction_reports_structure_before_policy() {
    let chain = seeded_chain();
    let keeper = &chain.keeper;

    let malformed = Reaction::new(1, 1, 0, ReactionValue::registered(1), author());
    assert!(matches!(
        keeper.validate_reaction(&malformed),
        Err(KeeperError::Validation(_))
    ));

    let bad_author = Reaction::new(1, 1, 1, ReactionValue::free_text("a"), Address::new(""));
    assert!(matches!(
        keeper.validate_reaction(&bad_author),
        Err(KeeperError::Validation(_))
    ));

    let no_params = Reaction::new(5, 1, 1, ReactionValue::free_text("a"), author());
    assert!(matches!(
        keeper.validate_reaction(&no_params),
        Err(KeeperError::NotFound(_))
    ));
}

#[test]
fn observers_fire_in_order_for_every_write() {
    let mut chain = seeded_chain();
    let first = Arc::new(RecordingHooks::default());
    let second = Arc::new(RecordingHooks::default());
    chain.register_hooks(first.clone());
    chain.register_hooks(second.clone());

    let keeper = &chain.keeper;
    keeper.save_registered_reaction(&hello_reaction(1, 1)).unwrap();
    keeper
        .save_reaction(&registered_value_reaction(1, 1, 1, 1, &author()))
        .unwrap();
    keeper.delete_registered_reaction(1, 1).unwrap();
    keeper
        .save_subspace_reactions_params(&SubspaceReactionsParams::default_for(1, 2))
        .unwrap();

    let expected = vec![
        HookEvent::RegisteredReactionSaved { subspace_id: 1, id: 1 },
        HookEvent::ReactionSaved {
            subspace_id: 1,
            post_id: 1,
            reaction_id: 1,
        },
        HookEvent::ReactionDeleted {
            subspace_id: 1,
            post_id: 1,
            reaction_id: 1,
        },
        HookEvent::RegisteredReactionDeleted { subspace_id: 1, id: 1 },
        HookEvent::ParamsSaved { subspace_id: 1 },
    ];
    assert_eq!(first.events(), expected);
    assert_eq!(second.events(), expected);
}
