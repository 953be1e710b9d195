use std::sync::Arc;

use reactions_kernel::{
    Address, ErrorKind, KeeperConfig, KeeperError, Missing, PageRequest, Reaction, ReactionValue,
};
use reactions_store::MemStore;
use reactions_testkit::TestChain;
use reactions_testkit::fixtures::{author, hello_reaction, other, owner};

mod helpers;
use helpers::{init_logging, seeded_chain};

fn free_text(post_id: u64, id: u32, text: &str, user: Address) -> Reaction {
    Reaction::new(1, post_id, id, ReactionValue::free_text(text), user)
}

fn ids(reactions: &[Reaction]) -> Vec<u32> {
    reactions.iter().map(|r| r.id).collect()
}

/// Five reactions on post 1 plus noise on post 2.
fn chain_with_reactions() -> TestChain {
    let chain = seeded_chain();
    chain.create_post(1, 0, 2, &owner()).unwrap();
    for id in 1..=5 {
        let user = if id % 2 == 0 { other() } else { author() };
        chain
            .keeper
            .save_reaction(&free_text(1, id, &id.to_string(), user))
            .unwrap();
    }
    chain
        .keeper
        .save_reaction(&free_text(2, 1, "x", author()))
        .unwrap();
    chain
}

#[test]
fn key_pagination_walks_every_page() {
    let chain = chain_with_reactions();
    let keeper = &chain.keeper;

    let first = keeper
        .query_reactions(1, 1, None, &PageRequest::with_limit(2))
        .unwrap();
    assert_eq!(ids(&first.items), vec![1, 2]);
    let token = first.page.next_key.clone().unwrap();

    let second = keeper
        .query_reactions(1, 1, None, &PageRequest::after(token, 2))
        .unwrap();
    assert_eq!(ids(&second.items), vec![3, 4]);
    assert_eq!(second.page.total, None);

    let third = keeper
        .query_reactions(1, 1, None, &PageRequest::after(second.page.next_key.unwrap(), 2))
        .unwrap();
    assert_eq!(ids(&third.items), vec![5]);
    assert_eq!(third.page.next_key, None);
}

#[test]
fn offset_pagination_counts_total() {
    let chain = chain_with_reactions();
    let request = PageRequest {
        offset: 1,
        limit: 3,
        count_total: true,
        ..PageRequest::default()
    };
    let page = chain.keeper.query_reactions(1, 1, None, &request).unwrap();
    assert_eq!(ids(&page.items), vec![2, 3, 4]);
    assert_eq!(page.page.total, Some(5));
    assert!(page.page.next_key.is_some());

    let reversed = PageRequest {
        limit: 2,
        reverse: true,
        ..PageRequest::default()
    };
    let page = chain.keeper.query_reactions(1, 1, None, &reversed).unwrap();
    assert_eq!(ids(&page.items), vec![5, 4]);
    assert_eq!(page.page.total, None);
}

#[test]
fn author_filter_applies_before_paging() {
    let chain = chain_with_reactions();
    let page = chain
        .keeper
        .query_reactions(1, 1, Some(&author()), &PageRequest::with_limit(2))
        .unwrap();
    assert_eq!(ids(&page.items), vec![1, 3]);
    assert!(page.page.next_key.is_some());

    let rest = chain
        .keeper
        .query_reactions(
            1,
            1,
            Some(&author()),
            &PageRequest::after(page.page.next_key.unwrap(), 2),
        )
        .unwrap();
    assert_eq!(ids(&rest.items), vec![5]);
}

#[test]
fn page_limit_is_capped_by_config() {
    init_logging();
    let config = KeeperConfig {
        default_page_limit: 2,
        max_page_limit: 3,
        ..KeeperConfig::default()
    };
    let chain = TestChain::with_store_and_config(Arc::new(MemStore::new()), config);
    chain.create_subspace(1, &owner()).unwrap();
    chain.create_post(1, 0, 1, &owner()).unwrap();
    for id in 1..=5 {
        chain
            .keeper
            .save_reaction(&free_text(1, id, "a", author()))
            .unwrap();
    }

    let defaulted = chain
        .keeper
        .query_reactions(1, 1, None, &PageRequest::default())
        .unwrap();
    assert_eq!(defaulted.items.len(), 2);
    let capped = chain
        .keeper
        .query_reactions(1, 1, None, &PageRequest::with_limit(50))
        .unwrap();
    assert_eq!(capped.items.len(), 3);
}

#[test]
fn registered_reactions_are_listed_per_subspace() {
    let chain = seeded_chain();
    chain.create_subspace(2, &owner()).unwrap();
    for (subspace_id, id) in [(1, 1), (1, 2), (2, 1)] {
        chain
            .keeper
            .save_registered_reaction(&hello_reaction(subspace_id, id))
            .unwrap();
    }

    let page = chain
        .keeper
        .query_registered_reactions(1, &PageRequest::default())
        .unwrap();
    assert_eq!(page.items, vec![hello_reaction(1, 1), hello_reaction(1, 2)]);
    assert_eq!(page.page.next_key, None);
    assert_eq!(
        chain.keeper.query_registered_reaction(2, 1).unwrap(),
        hello_reaction(2, 1)
    );
}

#[test]
fn zero_ids_and_bad_tokens_are_invalid() {
    let chain = chain_with_reactions();
    let keeper = &chain.keeper;
    let page = PageRequest::default();

    assert_eq!(
        keeper.query_reactions(0, 1, None, &page).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        keeper.query_reactions(1, 0, None, &page).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        keeper.query_reaction(1, 1, 0).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        keeper.query_registered_reactions(0, &page).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        keeper.query_registered_reaction(1, 0).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        keeper.query_reactions_params(0).unwrap_err().kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        keeper
            .query_reactions(1, 1, None, &PageRequest::after("not base64!", 2))
            .unwrap_err()
            .kind(),
        ErrorKind::Validation
    );
}

#[test]
fn missing_records_are_not_found() {
    let chain = seeded_chain();
    let keeper = &chain.keeper;

    assert!(matches!(
        keeper.query_reaction(1, 1, 3).unwrap_err(),
        KeeperError::NotFound(Missing::Reaction { id: 3, .. })
    ));
    assert!(matches!(
        keeper.query_registered_reaction(1, 3).unwrap_err(),
        KeeperError::NotFound(Missing::RegisteredReaction { id: 3, .. })
    ));
    assert!(matches!(
        keeper.query_reactions_params(4).unwrap_err(),
        KeeperError::NotFound(Missing::Params(4))
    ));
    assert!(
        keeper
            .query_reactions(1, 1, None, &PageRequest::default())
            .unwrap()
            .items
            .is_empty()
    );
}
