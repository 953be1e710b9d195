//! Lifecycle notification points.
//!
//! [`ReactionsHooks`] is the observer interface fired by the keeper after its own writes. The
//! [`SubspacesHooks`] and [`PostsHooks`] traits are the entry points external aggregates call
//! when their scopes are created or removed; the keeper implements both.

use crate::error::KeeperResult;

/// Observer for reactions writes. Every method defaults to a no-op.
pub trait ReactionsHooks: Send + Sync {
    fn after_reaction_saved(&self, _subspace_id: u64, _post_id: u64, _reaction_id: u32) {}

    fn after_reaction_deleted(&self, _subspace_id: u64, _post_id: u64, _reaction_id: u32) {}

    fn after_registered_reaction_saved(&self, _subspace_id: u64, _registered_reaction_id: u32) {}

    fn after_registered_reaction_deleted(&self, _subspace_id: u64, _registered_reaction_id: u32) {
    }

    fn after_reactions_params_saved(&self, _subspace_id: u64) {}
}

pub trait SubspacesHooks {
    fn after_subspace_saved(&self, subspace_id: u64) -> KeeperResult<()>;
    fn after_subspace_deleted(&self, subspace_id: u64) -> KeeperResult<()>;
}

pub trait PostsHooks {
    fn after_post_saved(&self, subspace_id: u64, post_id: u64) -> KeeperResult<()>;
    fn after_post_deleted(&self, subspace_id: u64, post_id: u64) -> KeeperResult<()>;
}
