use reactions_store::{KvStore, TypedStore};

use super::Keeper;
use crate::error::KeeperResult;
use crate::keys::{self, KeyFamily};
use crate::model::{ReactionValue, RegisteredReaction};

impl<S: KvStore> Keeper<S> {
    /// Upsert a registered reaction and notify observers.
    pub fn save_registered_reaction(&self, reaction: &RegisteredReaction) -> KeeperResult<()> {
        let key = keys::registered_reaction_key(reaction.subspace_id, reaction.id);
        self.store.put_record(&key, reaction)?;
        log::debug!(
            "saved registered reaction {} in subspace {}",
            reaction.id,
            reaction.subspace_id
        );
        self.notify(|h| h.after_registered_reaction_saved(reaction.subspace_id, reaction.id));
        Ok(())
    }

    pub fn has_registered_reaction(&self, subspace_id: u64, id: u32) -> KeeperResult<bool> {
        Ok(self
            .store
            .has(&keys::registered_reaction_key(subspace_id, id))?)
    }

    pub fn get_registered_reaction(
        &self,
        subspace_id: u64,
        id: u32,
    ) -> KeeperResult<Option<RegisteredReaction>> {
        Ok(self
            .store
            .get_record(&keys::registered_reaction_key(subspace_id, id))?)
    }

    /// Every registered reaction of a subspace, by ascending id.
    pub fn get_subspace_registered_reactions(
        &self,
        subspace_id: u64,
    ) -> KeeperResult<Vec<RegisteredReaction>> {
        self.scan_registered_reactions(&keys::registered_reactions_prefix(subspace_id))
    }

    /// Every stored registered reaction, by subspace then id.
    pub fn get_registered_reactions(&self) -> KeeperResult<Vec<RegisteredReaction>> {
        self.scan_registered_reactions(&KeyFamily::RegisteredReaction.prefix())
    }

    fn scan_registered_reactions(&self, prefix: &[u8]) -> KeeperResult<Vec<RegisteredReaction>> {
        Ok(self
            .store
            .scan_records::<RegisteredReaction>(prefix)?
            .into_iter()
            .map(|(_, reaction)| reaction)
            .collect())
    }

    /// Remove a registered reaction along with every reaction in the subspace that uses it.
    pub fn delete_registered_reaction(&self, subspace_id: u64, id: u32) -> KeeperResult<()> {
        self.store
            .delete(&keys::registered_reaction_key(subspace_id, id))?;

        let referenced = ReactionValue::registered(id);
        let mut removed = 0usize;
        for reaction in self.get_subspace_reactions(subspace_id)? {
            if reaction.value == referenced {
                self.delete_reaction(reaction.subspace_id, reaction.post_id, reaction.id)?;
                removed += 1;
            }
        }
        log::debug!(
            "deleted registered reaction {id} of subspace {subspace_id} and {removed} reactions"
        );

        self.notify(|h| h.after_registered_reaction_deleted(subspace_id, id));
        Ok(())
    }
}
