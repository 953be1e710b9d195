use reactions_store::KvStore;

use super::Keeper;
use crate::error::{Counter, KeeperError, KeeperResult};
use crate::keys::{self, u32_from_bytes};

impl<S: KvStore> Keeper<S> {
    fn read_counter(&self, key: &[u8], counter: Counter) -> KeeperResult<u32> {
        match self.store.get(key)? {
            Some(bytes) => Ok(u32_from_bytes(&bytes)),
            None => Err(KeeperError::NotInitialized(counter)),
        }
    }

    fn write_counter(&self, key: &[u8], value: u32) -> KeeperResult<()> {
        self.store.set(key, &value.to_be_bytes())?;
        Ok(())
    }

    pub fn set_next_registered_reaction_id(&self, subspace_id: u64, id: u32) -> KeeperResult<()> {
        self.write_counter(&keys::next_registered_reaction_id_key(subspace_id), id)
    }

    pub fn has_next_registered_reaction_id(&self, subspace_id: u64) -> KeeperResult<bool> {
        Ok(self
            .store
            .has(&keys::next_registered_reaction_id_key(subspace_id))?)
    }

    /// Fails with `NotInitialized` when the subspace counter was never set.
    pub fn get_next_registered_reaction_id(&self, subspace_id: u64) -> KeeperResult<u32> {
        self.read_counter(
            &keys::next_registered_reaction_id_key(subspace_id),
            Counter::NextRegisteredReactionId { subspace_id },
        )
    }

    pub fn delete_next_registered_reaction_id(&self, subspace_id: u64) -> KeeperResult<()> {
        self.store
            .delete(&keys::next_registered_reaction_id_key(subspace_id))?;
        Ok(())
    }

    pub fn set_next_reaction_id(
        &self,
        subspace_id: u64,
        post_id: u64,
        id: u32,
    ) -> KeeperResult<()> {
        self.write_counter(&keys::next_reaction_id_key(subspace_id, post_id), id)
    }

    pub fn has_next_reaction_id(&self, subspace_id: u64, post_id: u64) -> KeeperResult<bool> {
        Ok(self
            .store
            .has(&keys::next_reaction_id_key(subspace_id, post_id))?)
    }

    /// Fails with `NotInitialized` when the post counter was never set.
    pub fn get_next_reaction_id(&self, subspace_id: u64, post_id: u64) -> KeeperResult<u32> {
        self.read_counter(
            &keys::next_reaction_id_key(subspace_id, post_id),
            Counter::NextReactionId {
                subspace_id,
                post_id,
            },
        )
    }

    pub fn delete_next_reaction_id(&self, subspace_id: u64, post_id: u64) -> KeeperResult<()> {
        self.store
            .delete(&keys::next_reaction_id_key(subspace_id, post_id))?;
        Ok(())
    }
}

/// The id that follows `issued` in the scope of `counter`.
///
/// Allocation calls this before writing the record, so an exhausted counter leaves the store
/// untouched.
pub(crate) fn next_after(issued: u32, counter: Counter) -> KeeperResult<u32> {
    issued
        .checked_add(1)
        .ok_or(KeeperError::CounterOverflow(counter))
}
