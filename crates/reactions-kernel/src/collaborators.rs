//! Read-only views of the aggregates the reactions keeper depends on but does not own.

use std::ops::ControlFlow;

use crate::model::Address;

/// Section that holds subspace-wide permissions.
pub const ROOT_SECTION_ID: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subspace {
    pub id: u64,
    pub name: String,
    pub owner: Address,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub subspace_id: u64,
    pub section_id: u32,
    pub id: u64,
    pub owner: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    React,
    ManageRegisteredReactions,
    ManageReactionParams,
}

/// Traversal callback; return `ControlFlow::Break(())` to stop early.
pub type Visit<'a, T> = &'a mut dyn FnMut(&T) -> ControlFlow<()>;

pub trait SubspacesReader: Send + Sync {
    fn has_subspace(&self, subspace_id: u64) -> bool;
    fn iterate_subspaces(&self, visit: Visit<'_, Subspace>);
    fn has_permission(
        &self,
        subspace_id: u64,
        section_id: u32,
        user: &Address,
        permission: Permission,
    ) -> bool;
}

pub trait PostsReader: Send + Sync {
    fn has_post(&self, subspace_id: u64, post_id: u64) -> bool;
    fn get_post(&self, subspace_id: u64, post_id: u64) -> Option<Post>;
    fn iterate_posts(&self, visit: Visit<'_, Post>);
}

pub trait RelationshipsReader: Send + Sync {
    fn has_user_blocked(&self, blocker: &Address, user: &Address, subspace_id: u64) -> bool;
}

pub trait ProfilesReader: Send + Sync {
    fn has_profile(&self, user: &Address) -> bool;
}

/// Collect every subspace id, in collaborator order.
pub(crate) fn subspace_ids(subspaces: &dyn SubspacesReader) -> Vec<u64> {
    let mut ids = Vec::new();
    subspaces.iterate_subspaces(&mut |subspace| {
        ids.push(subspace.id);
        ControlFlow::Continue(())
    });
    ids
}

/// Collect every `(subspace_id, post_id)` pair, in collaborator order.
pub(crate) fn post_ids(posts: &dyn PostsReader) -> Vec<(u64, u64)> {
    let mut ids = Vec::new();
    posts.iterate_posts(&mut |post| {
        ids.push((post.subspace_id, post.id));
        ControlFlow::Continue(())
    });
    ids
}
