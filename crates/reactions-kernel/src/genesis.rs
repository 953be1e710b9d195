//! Genesis payload: a flat snapshot of every counter and record the keeper owns.
//!
//! The canonical CBOR form is what consensus compares; JSON is provided for tooling. Export
//! and import live on the keeper (`keeper/genesis.rs`).

use std::collections::HashSet;

use reactions_store::{Digest, from_cbor, to_canonical_cbor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Reaction, RegisteredReaction, SubspaceReactionsParams};
use crate::validate::{ValidationError, ValidationResult, check_post_id, check_subspace_id};

/// Snapshot of `next_registered_reaction_id` for one subspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubspaceDataEntry {
    pub subspace_id: u64,
    pub registered_reaction_id: u32,
}

impl SubspaceDataEntry {
    pub fn new(subspace_id: u64, registered_reaction_id: u32) -> Self {
        Self {
            subspace_id,
            registered_reaction_id,
        }
    }

    pub fn validate(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        if self.registered_reaction_id == 0 {
            return Err(ValidationError::InitialRegisteredReactionId(
                self.registered_reaction_id,
            ));
        }
        Ok(())
    }
}

/// Snapshot of `next_reaction_id` for one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDataEntry {
    pub subspace_id: u64,
    pub post_id: u64,
    pub reaction_id: u32,
}

impl PostDataEntry {
    pub fn new(subspace_id: u64, post_id: u64, reaction_id: u32) -> Self {
        Self {
            subspace_id,
            post_id,
            reaction_id,
        }
    }

    pub fn validate(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        check_post_id(self.post_id)?;
        if self.reaction_id == 0 {
            return Err(ValidationError::InitialReactionId(self.reaction_id));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub subspaces_data: Vec<SubspaceDataEntry>,
    pub registered_reactions: Vec<RegisteredReaction>,
    pub posts_data: Vec<PostDataEntry>,
    pub reactions: Vec<Reaction>,
    pub subspaces_params: Vec<SubspaceReactionsParams>,
}

#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("invalid {kind} entry at index {index}: {source}")]
    InvalidEntry {
        kind: &'static str,
        index: usize,
        #[source]
        source: ValidationError,
    },
    #[error("duplicated {kind} entry: {detail}")]
    Duplicate { kind: &'static str, detail: String },
    #[error("genesis CBOR error: {0}")]
    Cbor(#[from] serde_cbor::Error),
    #[error("genesis JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn check_entries<T, K: Eq + std::hash::Hash + std::fmt::Debug>(
    kind: &'static str,
    entries: &[T],
    key: impl Fn(&T) -> K,
    validate: impl Fn(&T) -> ValidationResult,
) -> Result<(), GenesisError> {
    let mut seen = HashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let id = key(entry);
        if seen.contains(&id) {
            return Err(GenesisError::Duplicate {
                kind,
                detail: format!("{id:?}"),
            });
        }
        validate(entry).map_err(|source| GenesisError::InvalidEntry {
            kind,
            index,
            source,
        })?;
        seen.insert(id);
    }
    Ok(())
}

impl GenesisState {
    pub fn new(
        subspaces_data: Vec<SubspaceDataEntry>,
        registered_reactions: Vec<RegisteredReaction>,
        posts_data: Vec<PostDataEntry>,
        reactions: Vec<Reaction>,
        subspaces_params: Vec<SubspaceReactionsParams>,
    ) -> Self {
        Self {
            subspaces_data,
            registered_reactions,
            posts_data,
            reactions,
            subspaces_params,
        }
    }

    pub fn validate(&self) -> Result<(), GenesisError> {
        check_entries(
            "subspace data",
            &self.subspaces_data,
            |e| e.subspace_id,
            SubspaceDataEntry::validate,
        )?;
        check_entries(
            "registered reaction",
            &self.registered_reactions,
            |r| (r.subspace_id, r.id),
            RegisteredReaction::validate,
        )?;
        check_entries(
            "post data",
            &self.posts_data,
            |e| (e.subspace_id, e.post_id),
            PostDataEntry::validate,
        )?;
        check_entries(
            "reaction",
            &self.reactions,
            |r| (r.subspace_id, r.post_id, r.id),
            Reaction::validate,
        )?;
        check_entries(
            "subspace params",
            &self.subspaces_params,
            |p| p.subspace_id,
            SubspaceReactionsParams::validate,
        )
    }

    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, GenesisError> {
        Ok(to_canonical_cbor(self)?)
    }

    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, GenesisError> {
        Ok(from_cbor(bytes)?)
    }

    pub fn hash(&self) -> Result<Digest, GenesisError> {
        Ok(Digest::of_cbor(self)?)
    }

    pub fn to_json(&self) -> Result<String, GenesisError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GenesisError> {
        Ok(serde_json::from_str(json)?)
    }
}
