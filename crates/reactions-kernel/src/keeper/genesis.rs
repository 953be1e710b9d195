use reactions_store::KvStore;

use super::Keeper;
use crate::collaborators::{post_ids, subspace_ids};
use crate::error::{KeeperError, KeeperResult};
use crate::genesis::{GenesisState, PostDataEntry, SubspaceDataEntry};

impl<S: KvStore> Keeper<S> {
    /// Snapshot every counter and record.
    ///
    /// A counter missing for a live subspace or post is exported as 1 and logged; the invariant
    /// checker still reports it as broken.
    pub fn export_genesis(&self) -> KeeperResult<GenesisState> {
        let mut subspaces_data = Vec::new();
        for subspace_id in subspace_ids(self.subspaces()) {
            let next = match self.get_next_registered_reaction_id(subspace_id) {
                Ok(next) => next,
                Err(KeeperError::NotInitialized(counter)) => {
                    log::warn!("exporting {counter} as 1: counter missing");
                    1
                }
                Err(err) => return Err(err),
            };
            subspaces_data.push(SubspaceDataEntry::new(subspace_id, next));
        }

        let mut posts_data = Vec::new();
        for (subspace_id, post_id) in post_ids(self.posts()) {
            let next = match self.get_next_reaction_id(subspace_id, post_id) {
                Ok(next) => next,
                Err(KeeperError::NotInitialized(counter)) => {
                    log::warn!("exporting {counter} as 1: counter missing");
                    1
                }
                Err(err) => return Err(err),
            };
            posts_data.push(PostDataEntry::new(subspace_id, post_id, next));
        }

        let genesis = GenesisState::new(
            subspaces_data,
            self.get_registered_reactions()?,
            posts_data,
            self.get_reactions()?,
            self.get_all_subspace_reactions_params()?,
        );
        log::info!(
            "exported genesis: {} subspaces, {} registered, {} posts, {} reactions, {} params",
            genesis.subspaces_data.len(),
            genesis.registered_reactions.len(),
            genesis.posts_data.len(),
            genesis.reactions.len(),
            genesis.subspaces_params.len()
        );
        Ok(genesis)
    }

    /// Validate the payload, then write it verbatim.
    pub fn init_genesis(&self, genesis: &GenesisState) -> KeeperResult<()> {
        genesis.validate()?;
        self.import_genesis(genesis)
    }

    /// Write counters directly and upsert every record in payload order, without validation.
    pub fn import_genesis(&self, genesis: &GenesisState) -> KeeperResult<()> {
        for entry in &genesis.subspaces_data {
            self.set_next_registered_reaction_id(entry.subspace_id, entry.registered_reaction_id)?;
        }
        for registered in &genesis.registered_reactions {
            self.save_registered_reaction(registered)?;
        }
        for entry in &genesis.posts_data {
            self.set_next_reaction_id(entry.subspace_id, entry.post_id, entry.reaction_id)?;
        }
        for reaction in &genesis.reactions {
            self.save_reaction(reaction)?;
        }
        for params in &genesis.subspaces_params {
            self.save_subspace_reactions_params(params)?;
        }
        log::info!(
            "imported genesis: {} subspaces, {} registered, {} posts, {} reactions, {} params",
            genesis.subspaces_data.len(),
            genesis.registered_reactions.len(),
            genesis.posts_data.len(),
            genesis.reactions.len(),
            genesis.subspaces_params.len()
        );
        Ok(())
    }
}
