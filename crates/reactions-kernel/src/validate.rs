//! Stateless structural checks for records, genesis entries, and messages.

use regex::Regex;
use thiserror::Error;

use crate::model::{
    Address, FreeTextValueParams, Reaction, ReactionValue, RegisteredReaction,
    SubspaceReactionsParams,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid subspace id: {0}")]
    SubspaceId(u64),
    #[error("invalid post id: {0}")]
    PostId(u64),
    #[error("invalid reaction id: {0}")]
    ReactionId(u32),
    #[error("invalid registered reaction id: {0}")]
    RegisteredReactionId(u32),
    #[error("invalid initial registered reaction id: {0}")]
    InitialRegisteredReactionId(u32),
    #[error("invalid initial reaction id: {0}")]
    InitialReactionId(u32),
    #[error("free text value cannot be blank")]
    BlankText,
    #[error("invalid shorthand code: {0:?}")]
    ShorthandCode(String),
    #[error("invalid display value: {0:?}")]
    DisplayValue(String),
    #[error("invalid address: {0:?}")]
    Address(String),
    #[error("free text max length must be greater than zero")]
    MaxLength,
    #[error("invalid free text regex {pattern:?}: {reason}")]
    Regex { pattern: String, reason: String },
    #[error("invalid page key: {0}")]
    PageKey(String),
}

pub type ValidationResult = Result<(), ValidationError>;

pub(crate) fn check_subspace_id(id: u64) -> ValidationResult {
    if id == 0 {
        return Err(ValidationError::SubspaceId(id));
    }
    Ok(())
}

pub(crate) fn check_post_id(id: u64) -> ValidationResult {
    if id == 0 {
        return Err(ValidationError::PostId(id));
    }
    Ok(())
}

pub(crate) fn check_reaction_id(id: u32) -> ValidationResult {
    if id == 0 {
        return Err(ValidationError::ReactionId(id));
    }
    Ok(())
}

pub(crate) fn check_registered_reaction_id(id: u32) -> ValidationResult {
    if id == 0 {
        return Err(ValidationError::RegisteredReactionId(id));
    }
    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl Address {
    pub fn validate(&self) -> ValidationResult {
        let raw = self.as_str();
        if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_graphic()) {
            return Err(ValidationError::Address(raw.to_string()));
        }
        Ok(())
    }
}

impl ReactionValue {
    pub fn validate(&self) -> ValidationResult {
        match self {
            ReactionValue::Registered {
                registered_reaction_id,
            } => check_registered_reaction_id(*registered_reaction_id),
            ReactionValue::FreeText { text } if is_blank(text) => Err(ValidationError::BlankText),
            ReactionValue::FreeText { .. } => Ok(()),
        }
    }
}

impl Reaction {
    pub fn validate(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        check_post_id(self.post_id)?;
        check_reaction_id(self.id)?;
        self.value.validate()?;
        self.author.validate()
    }
}

impl RegisteredReaction {
    pub fn validate(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        check_registered_reaction_id(self.id)?;
        if is_blank(&self.shorthand_code) {
            return Err(ValidationError::ShorthandCode(self.shorthand_code.clone()));
        }
        if is_blank(&self.display_value) {
            return Err(ValidationError::DisplayValue(self.display_value.clone()));
        }
        Ok(())
    }
}

impl FreeTextValueParams {
    pub fn validate(&self) -> ValidationResult {
        if self.max_length == 0 {
            return Err(ValidationError::MaxLength);
        }
        self.compiled_regex().map(|_| ())
    }

    /// Compile the configured pattern; `None` when no pattern is set.
    pub fn compiled_regex(&self) -> Result<Option<Regex>, ValidationError> {
        if self.regex.is_empty() {
            return Ok(None);
        }
        Regex::new(&self.regex)
            .map(Some)
            .map_err(|err| ValidationError::Regex {
                pattern: self.regex.clone(),
                reason: err.to_string(),
            })
    }
}

impl SubspaceReactionsParams {
    pub fn validate(&self) -> ValidationResult {
        check_subspace_id(self.subspace_id)?;
        self.free_text.validate()
    }
}
