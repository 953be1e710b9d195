use reactions_store::{KvStore, TypedStore};

use super::Keeper;
use crate::error::{KeeperError, KeeperResult, Missing, Policy};
use crate::keys::{self, KeyFamily};
use crate::model::{Address, Reaction, ReactionValue};

impl<S: KvStore> Keeper<S> {
    /// Upsert a reaction and notify observers.
    pub fn save_reaction(&self, reaction: &Reaction) -> KeeperResult<()> {
        let key = keys::reaction_key(reaction.subspace_id, reaction.post_id, reaction.id);
        self.store.put_record(&key, reaction)?;
        log::debug!(
            "saved reaction {} on post {} in subspace {}",
            reaction.id,
            reaction.post_id,
            reaction.subspace_id
        );
        self.notify(|h| {
            h.after_reaction_saved(reaction.subspace_id, reaction.post_id, reaction.id)
        });
        Ok(())
    }

    pub fn has_reaction(&self, subspace_id: u64, post_id: u64, id: u32) -> KeeperResult<bool> {
        Ok(self
            .store
            .has(&keys::reaction_key(subspace_id, post_id, id))?)
    }

    pub fn get_reaction(
        &self,
        subspace_id: u64,
        post_id: u64,
        id: u32,
    ) -> KeeperResult<Option<Reaction>> {
        Ok(self
            .store
            .get_record(&keys::reaction_key(subspace_id, post_id, id))?)
    }

    pub fn delete_reaction(&self, subspace_id: u64, post_id: u64, id: u32) -> KeeperResult<()> {
        self.store
            .delete(&keys::reaction_key(subspace_id, post_id, id))?;
        log::debug!("deleted reaction {id} on post {post_id} in subspace {subspace_id}");
        self.notify(|h| h.after_reaction_deleted(subspace_id, post_id, id));
        Ok(())
    }

    /// Reactions of one post, by ascending id.
    pub fn get_post_reactions(
        &self,
        subspace_id: u64,
        post_id: u64,
    ) -> KeeperResult<Vec<Reaction>> {
        self.scan_reactions(&keys::post_reactions_prefix(subspace_id, post_id))
    }

    /// Reactions of every post in a subspace, by post then id.
    pub fn get_subspace_reactions(&self, subspace_id: u64) -> KeeperResult<Vec<Reaction>> {
        self.scan_reactions(&keys::subspace_reactions_prefix(subspace_id))
    }

    pub fn get_reactions(&self) -> KeeperResult<Vec<Reaction>> {
        self.scan_reactions(&KeyFamily::Reaction.prefix())
    }

    fn scan_reactions(&self, prefix: &[u8]) -> KeeperResult<Vec<Reaction>> {
        Ok(self
            .store
            .scan_records::<Reaction>(prefix)?
            .into_iter()
            .map(|(_, reaction)| reaction)
            .collect())
    }

    /// Whether `user` already has a reaction with exactly `value` on the post.
    pub fn has_reacted(
        &self,
        subspace_id: u64,
        post_id: u64,
        user: &Address,
        value: &ReactionValue,
    ) -> KeeperResult<bool> {
        Ok(self
            .get_post_reactions(subspace_id, post_id)?
            .iter()
            .any(|reaction| &reaction.author == user && &reaction.value == value))
    }

    /// Check structure first, then the subspace policy for the value kind.
    pub fn validate_reaction(&self, reaction: &Reaction) -> KeeperResult<()> {
        reaction.validate()?;

        let subspace_id = reaction.subspace_id;
        let params = self
            .get_subspace_reactions_params(subspace_id)?
            .ok_or(KeeperError::NotFound(Missing::Params(subspace_id)))?;

        match &reaction.value {
            ReactionValue::Registered {
                registered_reaction_id,
            } => {
                if !params.registered_reaction.enabled {
                    return Err(KeeperError::PolicyViolation(
                        Policy::RegisteredReactionsDisabled(subspace_id),
                    ));
                }
                if !self.has_registered_reaction(subspace_id, *registered_reaction_id)? {
                    return Err(KeeperError::PolicyViolation(
                        Policy::UnknownRegisteredReaction {
                            subspace_id,
                            id: *registered_reaction_id,
                        },
                    ));
                }
            }
            ReactionValue::FreeText { text } => {
                let free_text = &params.free_text;
                if !free_text.enabled {
                    return Err(KeeperError::PolicyViolation(Policy::FreeTextDisabled(
                        subspace_id,
                    )));
                }
                if text.len() > free_text.max_length as usize {
                    return Err(KeeperError::PolicyViolation(Policy::FreeTextTooLong {
                        len: text.len(),
                        max: free_text.max_length,
                    }));
                }
                if let Some(regex) = free_text.compiled_regex()? {
                    if !regex.is_match(text) {
                        return Err(KeeperError::PolicyViolation(
                            Policy::FreeTextRegexMismatch {
                                regex: free_text.regex.clone(),
                            },
                        ));
                    }
                }
            }
        }
        Ok(())
    }
}
