//! Write requests accepted by the keeper, with their stateless checks.

use serde::{Deserialize, Serialize};

use crate::model::{
    Address, FreeTextValueParams, ReactionValue, RegisteredReactionValueParams,
    SubspaceReactionsParams,
};
use crate::validate::{
    ValidationError, ValidationResult, check_post_id, check_reaction_id,
    check_registered_reaction_id, check_subspace_id,
};

fn check_text_field(
    value: &str,
    err: impl FnOnce(String) -> ValidationError,
) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(err(value.to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddReaction {
    pub subspace_id: u64,
    pub post_id: u64,
    pub value: ReactionValue,
    pub user: Address,
}

impl MsgAddReaction {
    pub fn new(
        subspace_id: u64,
        post_id: u64,
        value: ReactionValue,
        user: impl Into<Address>,
    ) -> Self {
        Self {
            subspace_id,
            post_id,
            value,
            user: user.into(),
        }
    }

    pub fn validate_basic(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        check_post_id(self.post_id)?;
        self.value.validate()?;
        self.user.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRemoveReaction {
    pub subspace_id: u64,
    pub post_id: u64,
    pub reaction_id: u32,
    pub user: Address,
}

impl MsgRemoveReaction {
    pub fn new(subspace_id: u64, post_id: u64, reaction_id: u32, user: impl Into<Address>) -> Self {
        Self {
            subspace_id,
            post_id,
            reaction_id,
            user: user.into(),
        }
    }

    pub fn validate_basic(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        check_post_id(self.post_id)?;
        check_reaction_id(self.reaction_id)?;
        self.user.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddRegisteredReaction {
    pub subspace_id: u64,
    pub shorthand_code: String,
    pub display_value: String,
    pub user: Address,
}

impl MsgAddRegisteredReaction {
    pub fn new(
        subspace_id: u64,
        shorthand_code: impl Into<String>,
        display_value: impl Into<String>,
        user: impl Into<Address>,
    ) -> Self {
        Self {
            subspace_id,
            shorthand_code: shorthand_code.into(),
            display_value: display_value.into(),
            user: user.into(),
        }
    }

    pub fn validate_basic(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        check_text_field(&self.shorthand_code, ValidationError::ShorthandCode)?;
        check_text_field(&self.display_value, ValidationError::DisplayValue)?;
        self.user.validate()
    }
}

/// Fields set to [`crate::model::DO_NOT_MODIFY`] keep their stored value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgEditRegisteredReaction {
    pub subspace_id: u64,
    pub registered_reaction_id: u32,
    pub shorthand_code: String,
    pub display_value: String,
    pub user: Address,
}

impl MsgEditRegisteredReaction {
    pub fn new(
        subspace_id: u64,
        registered_reaction_id: u32,
        shorthand_code: impl Into<String>,
        display_value: impl Into<String>,
        user: impl Into<Address>,
    ) -> Self {
        Self {
            subspace_id,
            registered_reaction_id,
            shorthand_code: shorthand_code.into(),
            display_value: display_value.into(),
            user: user.into(),
        }
    }

    pub fn validate_basic(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        check_registered_reaction_id(self.registered_reaction_id)?;
        check_text_field(&self.shorthand_code, ValidationError::ShorthandCode)?;
        check_text_field(&self.display_value, ValidationError::DisplayValue)?;
        self.user.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRemoveRegisteredReaction {
    pub subspace_id: u64,
    pub registered_reaction_id: u32,
    pub user: Address,
}

impl MsgRemoveRegisteredReaction {
    pub fn new(subspace_id: u64, registered_reaction_id: u32, user: impl Into<Address>) -> Self {
        Self {
            subspace_id,
            registered_reaction_id,
            user: user.into(),
        }
    }

    pub fn validate_basic(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        check_registered_reaction_id(self.registered_reaction_id)?;
        self.user.validate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetReactionsParams {
    pub subspace_id: u64,
    pub registered_reaction: RegisteredReactionValueParams,
    pub free_text: FreeTextValueParams,
    pub user: Address,
}

impl MsgSetReactionsParams {
    pub fn new(
        subspace_id: u64,
        registered_reaction: RegisteredReactionValueParams,
        free_text: FreeTextValueParams,
        user: impl Into<Address>,
    ) -> Self {
        Self {
            subspace_id,
            registered_reaction,
            free_text,
            user: user.into(),
        }
    }

    pub fn params(&self) -> SubspaceReactionsParams {
        SubspaceReactionsParams::new(
            self.subspace_id,
            self.registered_reaction,
            self.free_text.clone(),
        )
    }

    pub fn validate_basic(&self) -> ValidationResult {
        self.params().validate()?;
        self.user.validate()
    }
}
