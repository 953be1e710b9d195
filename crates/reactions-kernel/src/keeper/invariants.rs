use std::fmt::Write as _;

use reactions_store::KvStore;

use super::Keeper;
use crate::collaborators::subspace_ids;
use crate::error::{KeeperError, KeeperResult};
use crate::model::{Reaction, RegisteredReaction, SubspaceReactionsParams};

/// Short description of a record listed in an invariant report.
pub trait Offender {
    fn describe(&self) -> String;
}

impl Offender for u64 {
    fn describe(&self) -> String {
        format!("subspace {self}")
    }
}

impl Offender for RegisteredReaction {
    fn describe(&self) -> String {
        format!("subspace {}, registered reaction {}", self.subspace_id, self.id)
    }
}

impl Offender for Reaction {
    fn describe(&self) -> String {
        format!(
            "subspace {}, post {}, reaction {}",
            self.subspace_id, self.post_id, self.id
        )
    }
}

impl Offender for SubspaceReactionsParams {
    fn describe(&self) -> String {
        format!("subspace {}", self.subspace_id)
    }
}

/// Outcome of one read-only sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantReport<T> {
    pub name: &'static str,
    pub offenders: Vec<T>,
}

impl<T: Offender> InvariantReport<T> {
    fn new(name: &'static str, offenders: Vec<T>) -> Self {
        Self { name, offenders }
    }

    pub fn broken(&self) -> bool {
        !self.offenders.is_empty()
    }

    pub fn message(&self) -> String {
        let mut out = format!("reactions: {} invariant\n", self.name);
        if self.broken() {
            let _ = writeln!(out, "the following entries are invalid:");
            for offender in &self.offenders {
                let _ = writeln!(out, "{}", offender.describe());
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantsSummary {
    /// Subspace ids missing their counter or params.
    pub subspaces: InvariantReport<u64>,
    pub registered_reactions: InvariantReport<RegisteredReaction>,
    pub reactions: InvariantReport<Reaction>,
    pub params: InvariantReport<SubspaceReactionsParams>,
}

impl InvariantsSummary {
    pub fn is_broken(&self) -> bool {
        self.subspaces.broken()
            || self.registered_reactions.broken()
            || self.reactions.broken()
            || self.params.broken()
    }

    /// Messages of the broken sweeps, concatenated.
    pub fn message(&self) -> String {
        let mut out = String::new();
        if self.subspaces.broken() {
            out.push_str(&self.subspaces.message());
        }
        if self.registered_reactions.broken() {
            out.push_str(&self.registered_reactions.message());
        }
        if self.reactions.broken() {
            out.push_str(&self.reactions.message());
        }
        if self.params.broken() {
            out.push_str(&self.params.message());
        }
        out
    }
}

impl<S: KvStore> Keeper<S> {
    /// Every live subspace has its registered reaction counter and its params.
    pub fn check_subspaces_invariant(&self) -> KeeperResult<InvariantReport<u64>> {
        let mut offenders = Vec::new();
        for subspace_id in subspace_ids(self.subspaces()) {
            let has_counter = self.has_next_registered_reaction_id(subspace_id)?;
            let has_params = self.has_subspace_reactions_params(subspace_id)?;
            if !has_counter || !has_params {
                offenders.push(subspace_id);
            }
        }
        Ok(InvariantReport::new("invalid subspaces", offenders))
    }

    /// Every registered reaction has a live subspace, an id below the counter, and valid fields.
    pub fn check_registered_reactions_invariant(
        &self,
    ) -> KeeperResult<InvariantReport<RegisteredReaction>> {
        let mut offenders = Vec::new();
        for reaction in self.get_registered_reactions()? {
            let subspace_exists = self.subspaces().has_subspace(reaction.subspace_id);
            let below_counter = match self.get_next_registered_reaction_id(reaction.subspace_id) {
                Ok(next) => reaction.id < next,
                Err(KeeperError::NotInitialized(_)) => false,
                Err(err) => return Err(err),
            };
            if !subspace_exists || !below_counter || reaction.validate().is_err() {
                offenders.push(reaction);
            }
        }
        Ok(InvariantReport::new("invalid registered reactions", offenders))
    }

    /// Every reaction has a live subspace and post, an id below the counter, and valid fields.
    pub fn check_reactions_invariant(&self) -> KeeperResult<InvariantReport<Reaction>> {
        let mut offenders = Vec::new();
        for reaction in self.get_reactions()? {
            let subspace_exists = self.subspaces().has_subspace(reaction.subspace_id);
            let post_exists = self.posts().has_post(reaction.subspace_id, reaction.post_id);
            let below_counter =
                match self.get_next_reaction_id(reaction.subspace_id, reaction.post_id) {
                    Ok(next) => reaction.id < next,
                    Err(KeeperError::NotInitialized(_)) => false,
                    Err(err) => return Err(err),
                };
            if !subspace_exists || !post_exists || !below_counter || reaction.validate().is_err() {
                offenders.push(reaction);
            }
        }
        Ok(InvariantReport::new("invalid reactions", offenders))
    }

    /// Every params record has a live subspace and a valid policy.
    pub fn check_reactions_params_invariant(
        &self,
    ) -> KeeperResult<InvariantReport<SubspaceReactionsParams>> {
        let mut offenders = Vec::new();
        for params in self.get_all_subspace_reactions_params()? {
            let subspace_exists = self.subspaces().has_subspace(params.subspace_id);
            if !subspace_exists || params.validate().is_err() {
                offenders.push(params);
            }
        }
        Ok(InvariantReport::new("invalid reactions params", offenders))
    }

    /// Run all four sweeps; a broken sweep never stops the others.
    pub fn check_all_invariants(&self) -> KeeperResult<InvariantsSummary> {
        let summary = InvariantsSummary {
            subspaces: self.check_subspaces_invariant()?,
            registered_reactions: self.check_registered_reactions_invariant()?,
            reactions: self.check_reactions_invariant()?,
            params: self.check_reactions_params_invariant()?,
        };
        if summary.is_broken() {
            log::warn!("{}", summary.message());
        }
        Ok(summary)
    }
}
