use reactions_store::KvStore;

use super::Keeper;
use crate::error::KeeperResult;
use crate::hooks::{PostsHooks, SubspacesHooks};

impl<S: KvStore> SubspacesHooks for Keeper<S> {
    /// Initialize the counter and params of a subspace; existing values are left untouched.
    fn after_subspace_saved(&self, subspace_id: u64) -> KeeperResult<()> {
        if !self.has_next_registered_reaction_id(subspace_id)? {
            self.set_next_registered_reaction_id(subspace_id, 1)?;
        }
        if !self.has_subspace_reactions_params(subspace_id)? {
            self.save_subspace_reactions_params(&self.default_reactions_params(subspace_id))?;
        }
        Ok(())
    }

    /// Per-post cleanup is left to `after_post_deleted`.
    fn after_subspace_deleted(&self, subspace_id: u64) -> KeeperResult<()> {
        self.delete_next_registered_reaction_id(subspace_id)?;
        for registered in self.get_subspace_registered_reactions(subspace_id)? {
            self.delete_registered_reaction(subspace_id, registered.id)?;
        }
        self.delete_subspace_reactions_params(subspace_id)?;
        log::debug!("cleared reactions state of subspace {subspace_id}");
        Ok(())
    }
}

impl<S: KvStore> PostsHooks for Keeper<S> {
    fn after_post_saved(&self, subspace_id: u64, post_id: u64) -> KeeperResult<()> {
        if !self.has_next_reaction_id(subspace_id, post_id)? {
            self.set_next_reaction_id(subspace_id, post_id, 1)?;
        }
        Ok(())
    }

    fn after_post_deleted(&self, subspace_id: u64, post_id: u64) -> KeeperResult<()> {
        self.delete_next_reaction_id(subspace_id, post_id)?;
        for reaction in self.get_post_reactions(subspace_id, post_id)? {
            self.delete_reaction(subspace_id, post_id, reaction.id)?;
        }
        log::debug!("cleared reactions of post {post_id} in subspace {subspace_id}");
        Ok(())
    }
}
