use reactions_kernel::{
    Address, GenesisState, PostDataEntry, Reaction, ReactionValue, RegisteredReaction,
    SubspaceDataEntry, SubspaceReactionsParams,
};

pub const OWNER: &str = "cosmos1owner";
pub const AUTHOR: &str = "cosmos1author";
pub const OTHER: &str = "cosmos1other";

pub fn owner() -> Address {
    Address::new(OWNER)
}

pub fn author() -> Address {
    Address::new(AUTHOR)
}

pub fn other() -> Address {
    Address::new(OTHER)
}

pub fn hello_reaction(subspace_id: u64, id: u32) -> RegisteredReaction {
    RegisteredReaction::new(subspace_id, id, ":hello:", "https://example.com/hello.png")
}

pub fn registered_value_reaction(
    subspace_id: u64,
    post_id: u64,
    id: u32,
    registered_reaction_id: u32,
    author: &Address,
) -> Reaction {
    Reaction::new(
        subspace_id,
        post_id,
        id,
        ReactionValue::registered(registered_reaction_id),
        author.clone(),
    )
}

/// One subspace (counter 3) with one registered reaction, one post (counter 2) with one
/// reaction, and default params.
pub fn sample_genesis() -> GenesisState {
    GenesisState::new(
        vec![SubspaceDataEntry::new(1, 3)],
        vec![hello_reaction(1, 1)],
        vec![PostDataEntry::new(1, 1, 2)],
        vec![registered_value_reaction(1, 1, 1, 1, &author())],
        vec![SubspaceReactionsParams::default_for(1, 2)],
    )
}
