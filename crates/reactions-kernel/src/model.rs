//! Records owned by the reactions keeper.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel for [`RegisteredReactionUpdate`] fields that must keep their stored value.
pub const DO_NOT_MODIFY: &str = "[do-not-modify]";

/// Default free-text length limit for freshly created subspaces.
pub const DEFAULT_FREE_TEXT_MAX_LENGTH: u32 = 2;

/// Account address of a reaction author or message signer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(value: impl Into<String>) -> Self {
        Address(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(value: &str) -> Self {
        Address::new(value)
    }
}

impl From<String> for Address {
    fn from(value: String) -> Self {
        Address(value)
    }
}

/// Value carried by a reaction. Equality is variant-aware: a registered reaction with id 1
/// never equals the free text `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReactionValue {
    Registered { registered_reaction_id: u32 },
    FreeText { text: String },
}

impl ReactionValue {
    pub fn registered(registered_reaction_id: u32) -> Self {
        ReactionValue::Registered {
            registered_reaction_id,
        }
    }

    pub fn free_text(text: impl Into<String>) -> Self {
        ReactionValue::FreeText { text: text.into() }
    }

    pub fn registered_reaction_id(&self) -> Option<u32> {
        match self {
            ReactionValue::Registered {
                registered_reaction_id,
            } => Some(*registered_reaction_id),
            ReactionValue::FreeText { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredReaction {
    pub subspace_id: u64,
    pub id: u32,
    pub shorthand_code: String,
    pub display_value: String,
}

impl RegisteredReaction {
    pub fn new(
        subspace_id: u64,
        id: u32,
        shorthand_code: impl Into<String>,
        display_value: impl Into<String>,
    ) -> Self {
        Self {
            subspace_id,
            id,
            shorthand_code: shorthand_code.into(),
            display_value: display_value.into(),
        }
    }

    /// Apply an update without validating the result; callers validate before saving.
    pub fn update(&self, update: RegisteredReactionUpdate) -> Self {
        let keep_or = |new: String, old: &str| {
            if new == DO_NOT_MODIFY {
                old.to_string()
            } else {
                new
            }
        };
        Self {
            subspace_id: self.subspace_id,
            id: self.id,
            shorthand_code: keep_or(update.shorthand_code, &self.shorthand_code),
            display_value: keep_or(update.display_value, &self.display_value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredReactionUpdate {
    pub shorthand_code: String,
    pub display_value: String,
}

impl RegisteredReactionUpdate {
    pub fn new(shorthand_code: impl Into<String>, display_value: impl Into<String>) -> Self {
        Self {
            shorthand_code: shorthand_code.into(),
            display_value: display_value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub subspace_id: u64,
    pub post_id: u64,
    pub id: u32,
    pub value: ReactionValue,
    pub author: Address,
}

impl Reaction {
    pub fn new(
        subspace_id: u64,
        post_id: u64,
        id: u32,
        value: ReactionValue,
        author: impl Into<Address>,
    ) -> Self {
        Self {
            subspace_id,
            post_id,
            id,
            value,
            author: author.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredReactionValueParams {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeTextValueParams {
    pub enabled: bool,
    pub max_length: u32,
    /// Empty means no pattern is enforced.
    #[serde(default)]
    pub regex: String,
}

impl FreeTextValueParams {
    pub fn new(enabled: bool, max_length: u32, regex: impl Into<String>) -> Self {
        Self {
            enabled,
            max_length,
            regex: regex.into(),
        }
    }
}

/// Per-subspace policy governing which reaction values are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubspaceReactionsParams {
    pub subspace_id: u64,
    pub registered_reaction: RegisteredReactionValueParams,
    pub free_text: FreeTextValueParams,
}

impl SubspaceReactionsParams {
    pub fn new(
        subspace_id: u64,
        registered_reaction: RegisteredReactionValueParams,
        free_text: FreeTextValueParams,
    ) -> Self {
        Self {
            subspace_id,
            registered_reaction,
            free_text,
        }
    }

    /// Both value kinds enabled, no regex.
    pub fn default_for(subspace_id: u64, free_text_max_length: u32) -> Self {
        Self::new(
            subspace_id,
            RegisteredReactionValueParams { enabled: true },
            FreeTextValueParams::new(true, free_text_max_length, ""),
        )
    }
}
