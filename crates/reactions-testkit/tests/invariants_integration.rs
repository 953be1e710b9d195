use reactions_kernel::{
    FreeTextValueParams, Reaction, ReactionValue, RegisteredReaction,
    RegisteredReactionValueParams, Subspace, SubspaceReactionsParams,
};
use reactions_testkit::fixtures::{author, hello_reaction, owner, registered_value_reaction};

mod helpers;
use helpers::seeded_chain;

#[test]
fn consistent_store_passes_every_sweep() {
    let chain = seeded_chain();
    chain.keeper.save_registered_reaction(&hello_reaction(1, 1)).unwrap();
    chain.keeper.set_next_registered_reaction_id(1, 2).unwrap();
    chain
        .keeper
        .save_reaction(&registered_value_reaction(1, 1, 1, 1, &author()))
        .unwrap();
    chain.keeper.set_next_reaction_id(1, 1, 2).unwrap();

    let summary = chain.keeper.check_all_invariants().unwrap();
    assert!(!summary.is_broken(), "{}", summary.message());
    assert_eq!(summary.message(), "");
}

/// A reaction in a subspace the collaborator does not know about is listed as broken.
#[test]
fn reaction_in_unknown_subspace_is_reported() {
    let chain = seeded_chain();
    let orphan = registered_value_reaction(9, 1, 1, 1, &author());
    chain.keeper.save_reaction(&orphan).unwrap();
    chain.keeper.set_next_reaction_id(9, 1, 2).unwrap();

    let report = chain.keeper.check_reactions_invariant().unwrap();
    assert!(report.broken());
    assert_eq!(report.offenders, vec![orphan]);
    assert!(report.message().contains("subspace 9, post 1, reaction 1"));
}

#[test]
fn reaction_id_at_or_above_counter_is_reported() {
    let chain = seeded_chain();
    let reaction = registered_value_reaction(1, 1, 1, 1, &author());
    chain.keeper.save_reaction(&reaction).unwrap();
    // counter still at 1
    let report = chain.keeper.check_reactions_invariant().unwrap();
    assert_eq!(report.offenders, vec![reaction]);
}

#[test]
fn subspace_missing_counter_or_params_is_reported() {
    let chain = seeded_chain();
    chain.subspaces.insert(Subspace {
        id: 2,
        name: "no counter".into(),
        owner: owner(),
    });
    chain.create_subspace(3, &owner()).unwrap();
    chain.keeper.delete_subspace_reactions_params(3).unwrap();

    let report = chain.keeper.check_subspaces_invariant().unwrap();
    assert_eq!(report.offenders, vec![2, 3]);
}

#[test]
fn invalid_registered_reaction_and_params_are_reported() {
    let chain = seeded_chain();
    // bypass validation by writing through the keeper directly
    let blank = RegisteredReaction::new(1, 1, " ", "url");
    chain.keeper.save_registered_reaction(&blank).unwrap();
    chain.keeper.set_next_registered_reaction_id(1, 2).unwrap();

    let bad_params = SubspaceReactionsParams::new(
        1,
        RegisteredReactionValueParams { enabled: true },
        FreeTextValueParams::new(true, 0, ""),
    );
    chain.keeper.save_subspace_reactions_params(&bad_params).unwrap();

    let registered = chain.keeper.check_registered_reactions_invariant().unwrap();
    assert_eq!(registered.offenders, vec![blank]);
    let params = chain.keeper.check_reactions_params_invariant().unwrap();
    assert_eq!(params.offenders, vec![bad_params]);
}

/// One broken sweep does not hide the others.
#[test]
fn sweeps_do_not_short_circuit() {
    let chain = seeded_chain();
    chain
        .keeper
        .save_registered_reaction(&hello_reaction(5, 1))
        .unwrap();
    let orphan = Reaction::new(1, 42, 1, ReactionValue::free_text("x"), author());
    chain.keeper.save_reaction(&orphan).unwrap();
    chain
        .keeper
        .save_subspace_reactions_params(&SubspaceReactionsParams::default_for(6, 2))
        .unwrap();

    let before = chain.store.dump();
    let summary = chain.keeper.check_all_invariants().unwrap();
    assert!(summary.is_broken());
    assert!(!summary.subspaces.broken());
    assert_eq!(summary.registered_reactions.offenders, vec![hello_reaction(5, 1)]);
    assert_eq!(summary.reactions.offenders, vec![orphan]);
    assert_eq!(summary.params.offenders.len(), 1);
    assert_eq!(summary.params.offenders[0].subspace_id, 6);

    // read-only
    assert_eq!(chain.store.dump(), before);
}
