//! The reactions keeper: counters, records, lifecycle hooks, genesis, invariants, handlers,
//! and queries over one ordered store.
//!
//! Every operation runs synchronously against the store. Allocation reads a counter, writes the
//! record, then advances the counter; callers that share a keeper across threads must serialize
//! writes to the same scope.

use std::sync::Arc;

use reactions_store::KvStore;

use crate::collaborators::{PostsReader, ProfilesReader, RelationshipsReader, SubspacesReader};
use crate::config::KeeperConfig;
use crate::hooks::ReactionsHooks;

mod counters;
mod genesis;
mod invariants;
mod lifecycle;
mod msg_server;
mod params;
mod queries;
mod reactions;
mod registered_reactions;

pub(crate) use counters::next_after;
pub use invariants::{InvariantReport, InvariantsSummary, Offender};

/// External aggregates the keeper reads from.
#[derive(Clone)]
pub struct Collaborators {
    pub subspaces: Arc<dyn SubspacesReader>,
    pub posts: Arc<dyn PostsReader>,
    pub relationships: Arc<dyn RelationshipsReader>,
    pub profiles: Arc<dyn ProfilesReader>,
}

pub struct Keeper<S: KvStore> {
    store: Arc<S>,
    collaborators: Collaborators,
    hooks: Vec<Arc<dyn ReactionsHooks>>,
    config: KeeperConfig,
}

pub struct KeeperBuilder<S: KvStore> {
    store: Arc<S>,
    collaborators: Collaborators,
    hooks: Vec<Arc<dyn ReactionsHooks>>,
    config: KeeperConfig,
}

impl<S: KvStore> KeeperBuilder<S> {
    pub fn new(store: Arc<S>, collaborators: Collaborators) -> Self {
        Self {
            store,
            collaborators,
            hooks: Vec::new(),
            config: KeeperConfig::default(),
        }
    }

    pub fn with_config(mut self, config: KeeperConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ReactionsHooks>) -> Self {
        self.hooks.push(hooks);
        self
    }

    pub fn build(self) -> Keeper<S> {
        Keeper {
            store: self.store,
            collaborators: self.collaborators,
            hooks: self.hooks,
            config: self.config,
        }
    }
}

impl<S: KvStore> Keeper<S> {
    pub fn new(store: Arc<S>, collaborators: Collaborators) -> Self {
        KeeperBuilder::new(store, collaborators).build()
    }

    pub fn builder(store: Arc<S>, collaborators: Collaborators) -> KeeperBuilder<S> {
        KeeperBuilder::new(store, collaborators)
    }

    /// Append an observer; observers fire in registration order.
    pub fn register_hooks(&mut self, hooks: Arc<dyn ReactionsHooks>) {
        self.hooks.push(hooks);
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &KeeperConfig {
        &self.config
    }

    pub fn subspaces(&self) -> &dyn SubspacesReader {
        self.collaborators.subspaces.as_ref()
    }

    pub fn posts(&self) -> &dyn PostsReader {
        self.collaborators.posts.as_ref()
    }

    pub fn relationships(&self) -> &dyn RelationshipsReader {
        self.collaborators.relationships.as_ref()
    }

    pub fn profiles(&self) -> &dyn ProfilesReader {
        self.collaborators.profiles.as_ref()
    }

    fn notify(&self, fire: impl Fn(&dyn ReactionsHooks)) {
        for hooks in &self.hooks {
            fire(hooks.as_ref());
        }
    }
}
