use reactions_store::{KvStore, TypedStore};

use super::Keeper;
use crate::error::{KeeperError, KeeperResult, Missing};
use crate::keys;
use crate::model::{Address, Reaction, RegisteredReaction, SubspaceReactionsParams};
use crate::query::{Page, PageRequest, paginate};
use crate::validate::{
    check_post_id, check_reaction_id, check_registered_reaction_id, check_subspace_id,
};

impl<S: KvStore> Keeper<S> {
    /// Reactions of a post, optionally only those authored by `user`.
    pub fn query_reactions(
        &self,
        subspace_id: u64,
        post_id: u64,
        user: Option<&Address>,
        page: &PageRequest,
    ) -> KeeperResult<Page<Reaction>> {
        check_subspace_id(subspace_id)?;
        check_post_id(post_id)?;

        let mut entries = self
            .store
            .scan_records::<Reaction>(&keys::post_reactions_prefix(subspace_id, post_id))?;
        if let Some(user) = user {
            entries.retain(|(_, reaction)| &reaction.author == user);
        }
        Ok(paginate(entries, page, &self.config)?)
    }

    pub fn query_reaction(
        &self,
        subspace_id: u64,
        post_id: u64,
        reaction_id: u32,
    ) -> KeeperResult<Reaction> {
        check_subspace_id(subspace_id)?;
        check_post_id(post_id)?;
        check_reaction_id(reaction_id)?;

        self.get_reaction(subspace_id, post_id, reaction_id)?
            .ok_or(KeeperError::NotFound(Missing::Reaction {
                subspace_id,
                post_id,
                id: reaction_id,
            }))
    }

    pub fn query_registered_reactions(
        &self,
        subspace_id: u64,
        page: &PageRequest,
    ) -> KeeperResult<Page<RegisteredReaction>> {
        check_subspace_id(subspace_id)?;

        let entries = self
            .store
            .scan_records::<RegisteredReaction>(&keys::registered_reactions_prefix(subspace_id))?;
        Ok(paginate(entries, page, &self.config)?)
    }

    pub fn query_registered_reaction(
        &self,
        subspace_id: u64,
        registered_reaction_id: u32,
    ) -> KeeperResult<RegisteredReaction> {
        check_subspace_id(subspace_id)?;
        check_registered_reaction_id(registered_reaction_id)?;

        self.get_registered_reaction(subspace_id, registered_reaction_id)?
            .ok_or(KeeperError::NotFound(Missing::RegisteredReaction {
                subspace_id,
                id: registered_reaction_id,
            }))
    }

    pub fn query_reactions_params(
        &self,
        subspace_id: u64,
    ) -> KeeperResult<SubspaceReactionsParams> {
        check_subspace_id(subspace_id)?;

        self.get_subspace_reactions_params(subspace_id)?
            .ok_or(KeeperError::NotFound(Missing::Params(subspace_id)))
    }
}
