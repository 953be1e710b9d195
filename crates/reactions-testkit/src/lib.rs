//! Deterministic harness for exercising the reactions keeper against in-memory collaborators.

pub mod chain;
pub mod collaborators;
pub mod fixtures;

pub use chain::{HookEvent, RecordingHooks, TestChain};
pub use collaborators::{MemPosts, MemProfiles, MemRelationships, MemSubspaces};
