//! Reactions keeper: scoped id allocation, reaction records, and their lifecycle over an ordered
//! key-value store.

pub mod collaborators;
pub mod config;
pub mod error;
pub mod genesis;
pub mod hooks;
pub mod keeper;
pub mod keys;
pub mod migrations;
pub mod model;
pub mod msgs;
pub mod query;
pub mod validate;

pub use collaborators::{
    Permission, Post, PostsReader, ProfilesReader, ROOT_SECTION_ID, RelationshipsReader,
    Subspace, SubspacesReader,
};
pub use config::KeeperConfig;
pub use error::{Counter, ErrorKind, KeeperError, KeeperResult, Missing, Policy};
pub use genesis::{GenesisError, GenesisState, PostDataEntry, SubspaceDataEntry};
pub use hooks::{PostsHooks, ReactionsHooks, SubspacesHooks};
pub use keeper::{Collaborators, InvariantReport, InvariantsSummary, Keeper, KeeperBuilder};
pub use keys::KeyFamily;
pub use migrations::{AppliedMigration, Migration, MigrationError, Migrator};
pub use model::{
    Address, DO_NOT_MODIFY, FreeTextValueParams, Reaction, ReactionValue, RegisteredReaction,
    RegisteredReactionUpdate, RegisteredReactionValueParams, SubspaceReactionsParams,
};
pub use msgs::{
    MsgAddReaction, MsgAddRegisteredReaction, MsgEditRegisteredReaction, MsgRemoveReaction,
    MsgRemoveRegisteredReaction, MsgSetReactionsParams,
};
pub use query::{Page, PageRequest, PageResponse};
pub use validate::ValidationError;
