#![allow(dead_code)]

use reactions_kernel::{MsgAddRegisteredReaction, Permission};
use reactions_testkit::TestChain;
use reactions_testkit::fixtures::{author, owner};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Subspace 1 owned by `owner()` with post 1 in section 0; `author()` has a profile and may react.
pub fn seeded_chain() -> TestChain {
    init_logging();
    let chain = TestChain::new();
    chain.create_subspace(1, &owner()).unwrap();
    chain.create_post(1, 0, 1, &owner()).unwrap();
    chain.create_profile(&author());
    chain.grant(1, 0, &author(), &[Permission::React]);
    chain
}

/// Register `:hello:` in subspace 1 through the message handler; returns its id.
pub fn register_hello(chain: &TestChain) -> u32 {
    chain
        .keeper
        .add_registered_reaction(&MsgAddRegisteredReaction::new(
            1,
            ":hello:",
            "https://example.com/hello.png",
            owner(),
        ))
        .unwrap()
}
