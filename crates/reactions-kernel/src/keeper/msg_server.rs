use reactions_store::KvStore;

use super::Keeper;
use super::counters::next_after;
use crate::collaborators::{Permission, Post, ROOT_SECTION_ID};
use crate::error::{Counter, KeeperError, KeeperResult, Missing, Policy};
use crate::model::{Address, Reaction, RegisteredReaction, RegisteredReactionUpdate};
use crate::msgs::{
    MsgAddReaction, MsgAddRegisteredReaction, MsgEditRegisteredReaction, MsgRemoveReaction,
    MsgRemoveRegisteredReaction, MsgSetReactionsParams,
};

impl<S: KvStore> Keeper<S> {
    fn require_subspace(&self, subspace_id: u64) -> KeeperResult<()> {
        if !self.subspaces().has_subspace(subspace_id) {
            return Err(KeeperError::NotFound(Missing::Subspace(subspace_id)));
        }
        Ok(())
    }

    fn require_post(&self, subspace_id: u64, post_id: u64) -> KeeperResult<Post> {
        self.posts()
            .get_post(subspace_id, post_id)
            .ok_or(KeeperError::NotFound(Missing::Post {
                subspace_id,
                post_id,
            }))
    }

    fn require_permission(
        &self,
        subspace_id: u64,
        section_id: u32,
        user: &Address,
        permission: Permission,
        action: &str,
    ) -> KeeperResult<()> {
        if !self
            .subspaces()
            .has_permission(subspace_id, section_id, user, permission)
        {
            return Err(KeeperError::PermissionDenied(format!(
                "{user} cannot {action} inside subspace {subspace_id}"
            )));
        }
        Ok(())
    }

    /// Returns the id assigned to the new reaction.
    pub fn add_reaction(&self, msg: &MsgAddReaction) -> KeeperResult<u32> {
        msg.validate_basic()?;

        if !self.profiles().has_profile(&msg.user) {
            return Err(KeeperError::NotFound(Missing::Profile(msg.user.to_string())));
        }
        self.require_subspace(msg.subspace_id)?;
        let post = self.require_post(msg.subspace_id, msg.post_id)?;

        if self
            .relationships()
            .has_user_blocked(&post.owner, &msg.user, msg.subspace_id)
        {
            return Err(KeeperError::PolicyViolation(Policy::Blocked {
                user: msg.user.to_string(),
                owner: post.owner.to_string(),
            }));
        }
        self.require_permission(
            post.subspace_id,
            post.section_id,
            &msg.user,
            Permission::React,
            "add reactions",
        )?;

        if self.has_reacted(msg.subspace_id, msg.post_id, &msg.user, &msg.value)? {
            return Err(KeeperError::PolicyViolation(Policy::AlreadyReacted {
                user: msg.user.to_string(),
                post_id: msg.post_id,
            }));
        }

        let id = self.get_next_reaction_id(msg.subspace_id, msg.post_id)?;
        let next = next_after(
            id,
            Counter::NextReactionId {
                subspace_id: msg.subspace_id,
                post_id: msg.post_id,
            },
        )?;
        let reaction = Reaction::new(
            msg.subspace_id,
            msg.post_id,
            id,
            msg.value.clone(),
            msg.user.clone(),
        );
        self.validate_reaction(&reaction)?;

        self.save_reaction(&reaction)?;
        self.set_next_reaction_id(msg.subspace_id, msg.post_id, next)?;
        log::debug!(
            "subspace {} post {}: next reaction id -> {next}",
            msg.subspace_id,
            msg.post_id
        );
        Ok(id)
    }

    pub fn remove_reaction(&self, msg: &MsgRemoveReaction) -> KeeperResult<()> {
        msg.validate_basic()?;

        self.require_subspace(msg.subspace_id)?;
        let post = self.require_post(msg.subspace_id, msg.post_id)?;
        let reaction = self
            .get_reaction(msg.subspace_id, msg.post_id, msg.reaction_id)?
            .ok_or(KeeperError::NotFound(Missing::Reaction {
                subspace_id: msg.subspace_id,
                post_id: msg.post_id,
                id: msg.reaction_id,
            }))?;

        if reaction.author != msg.user {
            return Err(KeeperError::PermissionDenied(format!(
                "{} is not the author of reaction {}",
                msg.user, msg.reaction_id
            )));
        }
        self.require_permission(
            post.subspace_id,
            post.section_id,
            &msg.user,
            Permission::React,
            "remove reactions",
        )?;

        self.delete_reaction(msg.subspace_id, msg.post_id, msg.reaction_id)
    }

    /// Returns the id assigned to the new registered reaction.
    pub fn add_registered_reaction(&self, msg: &MsgAddRegisteredReaction) -> KeeperResult<u32> {
        msg.validate_basic()?;

        self.require_subspace(msg.subspace_id)?;
        self.require_permission(
            msg.subspace_id,
            ROOT_SECTION_ID,
            &msg.user,
            Permission::ManageRegisteredReactions,
            "manage registered reactions",
        )?;

        let id = self.get_next_registered_reaction_id(msg.subspace_id)?;
        let next = next_after(
            id,
            Counter::NextRegisteredReactionId {
                subspace_id: msg.subspace_id,
            },
        )?;
        let registered = RegisteredReaction::new(
            msg.subspace_id,
            id,
            msg.shorthand_code.clone(),
            msg.display_value.clone(),
        );
        registered.validate()?;

        self.save_registered_reaction(&registered)?;
        self.set_next_registered_reaction_id(msg.subspace_id, next)?;
        log::debug!(
            "subspace {}: next registered reaction id -> {next}",
            msg.subspace_id
        );
        Ok(id)
    }

    pub fn edit_registered_reaction(&self, msg: &MsgEditRegisteredReaction) -> KeeperResult<()> {
        msg.validate_basic()?;

        self.require_subspace(msg.subspace_id)?;
        let stored = self
            .get_registered_reaction(msg.subspace_id, msg.registered_reaction_id)?
            .ok_or(KeeperError::NotFound(Missing::RegisteredReaction {
                subspace_id: msg.subspace_id,
                id: msg.registered_reaction_id,
            }))?;
        self.require_permission(
            msg.subspace_id,
            ROOT_SECTION_ID,
            &msg.user,
            Permission::ManageRegisteredReactions,
            "manage registered reactions",
        )?;

        let updated = stored.update(RegisteredReactionUpdate::new(
            msg.shorthand_code.clone(),
            msg.display_value.clone(),
        ));
        updated.validate()?;
        self.save_registered_reaction(&updated)
    }

    pub fn remove_registered_reaction(
        &self,
        msg: &MsgRemoveRegisteredReaction,
    ) -> KeeperResult<()> {
        msg.validate_basic()?;

        self.require_subspace(msg.subspace_id)?;
        if !self.has_registered_reaction(msg.subspace_id, msg.registered_reaction_id)? {
            return Err(KeeperError::NotFound(Missing::RegisteredReaction {
                subspace_id: msg.subspace_id,
                id: msg.registered_reaction_id,
            }));
        }
        self.require_permission(
            msg.subspace_id,
            ROOT_SECTION_ID,
            &msg.user,
            Permission::ManageRegisteredReactions,
            "manage registered reactions",
        )?;

        self.delete_registered_reaction(msg.subspace_id, msg.registered_reaction_id)
    }

    pub fn set_reactions_params(&self, msg: &MsgSetReactionsParams) -> KeeperResult<()> {
        msg.validate_basic()?;

        self.require_subspace(msg.subspace_id)?;
        self.require_permission(
            msg.subspace_id,
            ROOT_SECTION_ID,
            &msg.user,
            Permission::ManageReactionParams,
            "manage reactions params",
        )?;

        let params = msg.params();
        params.validate()?;
        self.save_subspace_reactions_params(&params)
    }
}
