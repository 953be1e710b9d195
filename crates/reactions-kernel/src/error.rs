use std::fmt;

use reactions_store::StoreError;
use thiserror::Error;

use crate::genesis::GenesisError;
use crate::validate::ValidationError;

pub type KeeperResult<T> = Result<T, KeeperError>;

#[derive(Debug, Error)]
pub enum KeeperError {
    #[error("{0} not found")]
    NotFound(Missing),
    #[error("{0} counter not initialized")]
    NotInitialized(Counter),
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
    #[error("policy violation: {0}")]
    PolicyViolation(Policy),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("{0} counter overflow")]
    CounterOverflow(Counter),
    #[error("genesis error: {0}")]
    Genesis(#[from] GenesisError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Coarse classification of [`KeeperError`] for callers that only need to branch on outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    NotInitialized,
    Validation,
    PolicyViolation,
    PermissionDenied,
    Internal,
}

impl KeeperError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            KeeperError::NotFound(_) => ErrorKind::NotFound,
            KeeperError::NotInitialized(_) => ErrorKind::NotInitialized,
            KeeperError::Validation(_) | KeeperError::Genesis(_) => ErrorKind::Validation,
            KeeperError::PolicyViolation(_) => ErrorKind::PolicyViolation,
            KeeperError::PermissionDenied(_) => ErrorKind::PermissionDenied,
            KeeperError::CounterOverflow(_) | KeeperError::Store(_) => ErrorKind::Internal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Subspace(u64),
    Post { subspace_id: u64, post_id: u64 },
    RegisteredReaction { subspace_id: u64, id: u32 },
    Reaction { subspace_id: u64, post_id: u64, id: u32 },
    Params(u64),
    Profile(String),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Subspace(id) => write!(f, "subspace {id}"),
            Missing::Post {
                subspace_id,
                post_id,
            } => write!(f, "post {post_id} in subspace {subspace_id}"),
            Missing::RegisteredReaction { subspace_id, id } => {
                write!(f, "registered reaction {id} in subspace {subspace_id}")
            }
            Missing::Reaction {
                subspace_id,
                post_id,
                id,
            } => write!(
                f,
                "reaction {id} for post {post_id} in subspace {subspace_id}"
            ),
            Missing::Params(id) => write!(f, "reactions params for subspace {id}"),
            Missing::Profile(user) => write!(f, "profile of {user}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    NextRegisteredReactionId { subspace_id: u64 },
    NextReactionId { subspace_id: u64, post_id: u64 },
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Counter::NextRegisteredReactionId { subspace_id } => {
                write!(f, "next registered reaction id for subspace {subspace_id}")
            }
            Counter::NextReactionId {
                subspace_id,
                post_id,
            } => write!(
                f,
                "next reaction id for post {post_id} in subspace {subspace_id}"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Policy {
    #[error("registered reactions are not enabled in subspace {0}")]
    RegisteredReactionsDisabled(u64),
    #[error("free text reactions are not enabled in subspace {0}")]
    FreeTextDisabled(u64),
    #[error("free text is {len} bytes, longer than the allowed {max}")]
    FreeTextTooLong { len: usize, max: u32 },
    #[error("free text does not match {regex:?}")]
    FreeTextRegexMismatch { regex: String },
    #[error("registered reaction {id} does not exist in subspace {subspace_id}")]
    UnknownRegisteredReaction { subspace_id: u64, id: u32 },
    #[error("{user} has already reacted to post {post_id} with this value")]
    AlreadyReacted { user: String, post_id: u64 },
    #[error("{user} is blocked by the post author {owner}")]
    Blocked { user: String, owner: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_classifies_variants() {
        assert_eq!(
            KeeperError::NotFound(Missing::Subspace(1)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            KeeperError::NotInitialized(Counter::NextRegisteredReactionId { subspace_id: 1 })
                .kind(),
            ErrorKind::NotInitialized
        );
        assert_eq!(
            KeeperError::from(ValidationError::SubspaceId(0)).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            KeeperError::PolicyViolation(Policy::FreeTextDisabled(1)).kind(),
            ErrorKind::PolicyViolation
        );
    }

    #[test]
    fn messages_name_the_scope() {
        let err = KeeperError::NotInitialized(Counter::NextReactionId {
            subspace_id: 1,
            post_id: 7,
        });
        assert_eq!(
            err.to_string(),
            "next reaction id for post 7 in subspace 1 counter not initialized"
        );
    }
}
