//! Versioned, idempotent repairs of the stored reactions state.
//!
//! The schema version lives under [`KeyFamily::SchemaVersion`](crate::keys::KeyFamily); an
//! absent value means version 1. [`Migrator::run_pending`] applies every step above the stored
//! version in ascending order and records the new version after each one.

use std::collections::{BTreeMap, HashSet};

use reactions_store::{KvStore, StoreError};
use thiserror::Error;

use crate::collaborators::{post_ids, subspace_ids};
use crate::error::{Counter, KeeperError};
use crate::hooks::{PostsHooks, SubspacesHooks};
use crate::keeper::{Keeper, next_after};
use crate::keys::{self, parse_reaction_key, u32_from_bytes};

pub const BASE_SCHEMA_VERSION: u32 = 1;
pub const CURRENT_SCHEMA_VERSION: u32 = 3;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("migration v{version} ({name}) failed: {source}")]
    Step {
        version: u32,
        name: String,
        #[source]
        source: KeeperError,
    },
    #[error("two migrations target version {0}")]
    DuplicateVersion(u32),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub trait Migration<S: KvStore> {
    /// Schema version the store is at once this step has run.
    fn version(&self) -> u32;
    fn name(&self) -> &str;
    /// Must be a no-op when the store is already repaired.
    fn migrate(&self, keeper: &Keeper<S>) -> Result<(), KeeperError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMigration {
    pub version: u32,
    pub name: String,
}

pub fn schema_version<S: KvStore>(keeper: &Keeper<S>) -> Result<u32, StoreError> {
    Ok(keeper
        .store()
        .get(&keys::schema_version_key())?
        .map(|bytes| u32_from_bytes(&bytes))
        .unwrap_or(BASE_SCHEMA_VERSION))
}

pub fn set_schema_version<S: KvStore>(keeper: &Keeper<S>, version: u32) -> Result<(), StoreError> {
    keeper
        .store()
        .set(&keys::schema_version_key(), &version.to_be_bytes())
}

/// v1 -> v2: initialize counters and params of scopes created before they existed.
pub struct MigrateV2;

impl<S: KvStore> Migration<S> for MigrateV2 {
    fn version(&self) -> u32 {
        2
    }

    fn name(&self) -> &str {
        "backfill_counters_and_params"
    }

    fn migrate(&self, keeper: &Keeper<S>) -> Result<(), KeeperError> {
        for subspace_id in subspace_ids(keeper.subspaces()) {
            keeper.after_subspace_saved(subspace_id)?;
        }
        for (subspace_id, post_id) in post_ids(keeper.posts()) {
            keeper.after_post_saved(subspace_id, post_id)?;
        }
        Ok(())
    }
}

/// v2 -> v3: drop duplicated reactions, then derive missing post counters from what is left.
///
/// Deduplication runs first so the max-id scan only sees surviving reactions.
pub struct MigrateV3;

impl<S: KvStore> Migration<S> for MigrateV3 {
    fn version(&self) -> u32 {
        3
    }

    fn name(&self) -> &str {
        "dedupe_reactions_and_backfill_post_counters"
    }

    fn migrate(&self, keeper: &Keeper<S>) -> Result<(), KeeperError> {
        let mut seen = HashSet::new();
        let mut removed = 0usize;
        for reaction in keeper.get_reactions()? {
            let identity = (
                reaction.subspace_id,
                reaction.post_id,
                reaction.author.clone(),
                reaction.value.clone(),
            );
            if !seen.insert(identity) {
                keeper.delete_reaction(reaction.subspace_id, reaction.post_id, reaction.id)?;
                removed += 1;
            }
        }
        log::info!("removed {removed} duplicated reactions");

        let mut max_ids: BTreeMap<(u64, u64), u32> = BTreeMap::new();
        for (key, _) in keeper.store().scan_prefix(&keys::KeyFamily::Reaction.prefix())? {
            let (subspace_id, post_id, id) = parse_reaction_key(&key);
            let max = max_ids.entry((subspace_id, post_id)).or_insert(0);
            *max = (*max).max(id);
        }

        for (subspace_id, post_id) in post_ids(keeper.posts()) {
            if keeper.has_next_reaction_id(subspace_id, post_id)? {
                continue;
            }
            match max_ids.get(&(subspace_id, post_id)) {
                Some(&max) => {
                    let next = next_after(
                        max,
                        Counter::NextReactionId {
                            subspace_id,
                            post_id,
                        },
                    )?;
                    keeper.set_next_reaction_id(subspace_id, post_id, next)?
                }
                None => keeper.set_next_reaction_id(subspace_id, post_id, 1)?,
            }
        }
        Ok(())
    }
}

pub struct Migrator<S: KvStore> {
    steps: Vec<Box<dyn Migration<S>>>,
}

impl<S: KvStore> Default for Migrator<S> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<S: KvStore> Migrator<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every known step, up to [`CURRENT_SCHEMA_VERSION`].
    pub fn standard() -> Self {
        let mut migrator = Self::new();
        migrator.add(Box::new(MigrateV2));
        migrator.add(Box::new(MigrateV3));
        migrator
    }

    pub fn add(&mut self, step: Box<dyn Migration<S>>) {
        self.steps.push(step);
    }

    pub fn run_pending(&self, keeper: &Keeper<S>) -> Result<Vec<AppliedMigration>, MigrationError> {
        let mut sorted: Vec<&dyn Migration<S>> = self.steps.iter().map(|s| s.as_ref()).collect();
        sorted.sort_by_key(|step| step.version());
        if let Some(pair) = sorted.windows(2).find(|w| w[0].version() == w[1].version()) {
            return Err(MigrationError::DuplicateVersion(pair[0].version()));
        }

        let current = schema_version(keeper)?;
        let pending: Vec<_> = sorted
            .into_iter()
            .filter(|step| step.version() > current)
            .collect();
        if pending.is_empty() {
            log::info!("reactions schema at v{current}, no pending migrations");
            return Ok(Vec::new());
        }

        let mut applied = Vec::with_capacity(pending.len());
        for step in pending {
            log::info!("applying reactions migration v{}: {}", step.version(), step.name());
            step.migrate(keeper).map_err(|source| MigrationError::Step {
                version: step.version(),
                name: step.name().to_string(),
                source,
            })?;
            set_schema_version(keeper, step.version())?;
            applied.push(AppliedMigration {
                version: step.version(),
                name: step.name().to_string(),
            });
        }
        Ok(applied)
    }
}
