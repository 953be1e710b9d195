use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use reactions_kernel::{
    Address, Collaborators, Keeper, KeeperConfig, Permission, Post, PostsHooks, ReactionsHooks,
    Subspace, SubspacesHooks,
};
use reactions_store::{KvStore, MemStore};

use crate::collaborators::{MemPosts, MemProfiles, MemRelationships, MemSubspaces};

/// A keeper wired to in-memory collaborators, driving lifecycle hooks the way the surrounding
/// chain would.
pub struct TestChain<S: KvStore = MemStore> {
    pub keeper: Keeper<S>,
    pub store: Arc<S>,
    pub subspaces: Arc<MemSubspaces>,
    pub posts: Arc<MemPosts>,
    pub relationships: Arc<MemRelationships>,
    pub profiles: Arc<MemProfiles>,
}

impl TestChain<MemStore> {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemStore::new()))
    }
}

impl Default for TestChain<MemStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: KvStore> TestChain<S> {
    pub fn with_store(store: Arc<S>) -> Self {
        Self::with_store_and_config(store, KeeperConfig::default())
    }

    pub fn with_store_and_config(store: Arc<S>, config: KeeperConfig) -> Self {
        let subspaces = Arc::new(MemSubspaces::default());
        let posts = Arc::new(MemPosts::default());
        let relationships = Arc::new(MemRelationships::default());
        let profiles = Arc::new(MemProfiles::default());
        let collaborators = Collaborators {
            subspaces: subspaces.clone(),
            posts: posts.clone(),
            relationships: relationships.clone(),
            profiles: profiles.clone(),
        };
        let keeper = Keeper::builder(store.clone(), collaborators)
            .with_config(config)
            .build();
        Self {
            keeper,
            store,
            subspaces,
            posts,
            relationships,
            profiles,
        }
    }

    pub fn register_hooks(&mut self, hooks: Arc<dyn ReactionsHooks>) {
        self.keeper.register_hooks(hooks);
    }

    pub fn create_subspace(&self, subspace_id: u64, owner: &Address) -> Result<()> {
        self.subspaces.insert(Subspace {
            id: subspace_id,
            name: format!("subspace {subspace_id}"),
            owner: owner.clone(),
        });
        self.keeper.after_subspace_saved(subspace_id)?;
        Ok(())
    }

    /// Remove a subspace with its posts, firing the post hooks before the subspace hook.
    pub fn delete_subspace(&self, subspace_id: u64) -> Result<()> {
        for post_id in self.posts.subspace_post_ids(subspace_id) {
            self.delete_post(subspace_id, post_id)?;
        }
        self.subspaces.remove(subspace_id);
        self.keeper.after_subspace_deleted(subspace_id)?;
        Ok(())
    }

    pub fn create_post(
        &self,
        subspace_id: u64,
        section_id: u32,
        post_id: u64,
        owner: &Address,
    ) -> Result<()> {
        self.posts.insert(Post {
            subspace_id,
            section_id,
            id: post_id,
            owner: owner.clone(),
        });
        self.keeper.after_post_saved(subspace_id, post_id)?;
        Ok(())
    }

    pub fn delete_post(&self, subspace_id: u64, post_id: u64) -> Result<()> {
        self.posts.remove(subspace_id, post_id);
        self.keeper.after_post_deleted(subspace_id, post_id)?;
        Ok(())
    }

    pub fn create_profile(&self, user: &Address) {
        self.profiles.insert(user);
    }

    pub fn grant(
        &self,
        subspace_id: u64,
        section_id: u32,
        user: &Address,
        permissions: &[Permission],
    ) {
        for permission in permissions {
            self.subspaces.grant(subspace_id, section_id, user, *permission);
        }
    }

    pub fn block(&self, blocker: &Address, user: &Address, subspace_id: u64) {
        self.relationships.block(blocker, user, subspace_id);
    }
}

/// Observer notification captured by [`RecordingHooks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookEvent {
    ReactionSaved { subspace_id: u64, post_id: u64, reaction_id: u32 },
    ReactionDeleted { subspace_id: u64, post_id: u64, reaction_id: u32 },
    RegisteredReactionSaved { subspace_id: u64, id: u32 },
    RegisteredReactionDeleted { subspace_id: u64, id: u32 },
    ParamsSaved { subspace_id: u64 },
}

/// Observer that records every notification in order.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    events: Mutex<Vec<HookEvent>>,
}

impl RecordingHooks {
    pub fn events(&self) -> Vec<HookEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, event: HookEvent) {
        log::trace!("hook fired: {event:?}");
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl ReactionsHooks for RecordingHooks {
    fn after_reaction_saved(&self, subspace_id: u64, post_id: u64, reaction_id: u32) {
        self.push(HookEvent::ReactionSaved {
            subspace_id,
            post_id,
            reaction_id,
        });
    }

    fn after_reaction_deleted(&self, subspace_id: u64, post_id: u64, reaction_id: u32) {
        self.push(HookEvent::ReactionDeleted {
            subspace_id,
            post_id,
            reaction_id,
        });
    }

    fn after_registered_reaction_saved(&self, subspace_id: u64, id: u32) {
        self.push(HookEvent::RegisteredReactionSaved { subspace_id, id });
    }

    fn after_registered_reaction_deleted(&self, subspace_id: u64, id: u32) {
        self.push(HookEvent::RegisteredReactionDeleted { subspace_id, id });
    }

    fn after_reactions_params_saved(&self, subspace_id: u64) {
        self.push(HookEvent::ParamsSaved { subspace_id });
    }
}
