use reactions_store::{KvStore, TypedStore};

use super::Keeper;
use crate::error::KeeperResult;
use crate::keys::{self, KeyFamily};
use crate::model::SubspaceReactionsParams;

impl<S: KvStore> Keeper<S> {
    pub fn save_subspace_reactions_params(
        &self,
        params: &SubspaceReactionsParams,
    ) -> KeeperResult<()> {
        self.store
            .put_record(&keys::reactions_params_key(params.subspace_id), params)?;
        log::debug!("saved reactions params for subspace {}", params.subspace_id);
        self.notify(|h| h.after_reactions_params_saved(params.subspace_id));
        Ok(())
    }

    pub fn has_subspace_reactions_params(&self, subspace_id: u64) -> KeeperResult<bool> {
        Ok(self.store.has(&keys::reactions_params_key(subspace_id))?)
    }

    pub fn get_subspace_reactions_params(
        &self,
        subspace_id: u64,
    ) -> KeeperResult<Option<SubspaceReactionsParams>> {
        Ok(self
            .store
            .get_record(&keys::reactions_params_key(subspace_id))?)
    }

    pub fn delete_subspace_reactions_params(&self, subspace_id: u64) -> KeeperResult<()> {
        self.store.delete(&keys::reactions_params_key(subspace_id))?;
        Ok(())
    }

    pub fn get_all_subspace_reactions_params(&self) -> KeeperResult<Vec<SubspaceReactionsParams>> {
        Ok(self
            .store
            .scan_records::<SubspaceReactionsParams>(&KeyFamily::ReactionsParams.prefix())?
            .into_iter()
            .map(|(_, params)| params)
            .collect())
    }

    /// The policy a newly created subspace starts with.
    pub fn default_reactions_params(&self, subspace_id: u64) -> SubspaceReactionsParams {
        SubspaceReactionsParams::default_for(subspace_id, self.config.default_free_text_max_length)
    }
}
