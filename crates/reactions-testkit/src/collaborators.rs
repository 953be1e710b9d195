//! In-memory stand-ins for the subspaces, posts, relationships, and profiles aggregates.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use reactions_kernel::collaborators::Visit;
use reactions_kernel::{
    Address, Permission, Post, PostsReader, ProfilesReader, ROOT_SECTION_ID, RelationshipsReader,
    Subspace, SubspacesReader,
};

type Grants = HashMap<(u64, u32, Address), HashSet<Permission>>;

/// Subspaces keyed by id. The owner holds every permission; grants in the root section apply to
/// every section.
#[derive(Debug, Default)]
pub struct MemSubspaces {
    subspaces: RwLock<BTreeMap<u64, Subspace>>,
    grants: RwLock<Grants>,
}

impl MemSubspaces {
    pub fn insert(&self, subspace: Subspace) {
        self.subspaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(subspace.id, subspace);
    }

    pub fn remove(&self, subspace_id: u64) -> Option<Subspace> {
        self.grants
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(id, _, _), _| *id != subspace_id);
        self.subspaces
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&subspace_id)
    }

    pub fn grant(&self, subspace_id: u64, section_id: u32, user: &Address, permission: Permission) {
        self.grants
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry((subspace_id, section_id, user.clone()))
            .or_default()
            .insert(permission);
    }

    fn granted(
        &self,
        subspace_id: u64,
        section_id: u32,
        user: &Address,
        permission: Permission,
    ) -> bool {
        self.grants
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(subspace_id, section_id, user.clone()))
            .is_some_and(|perms| perms.contains(&permission))
    }
}

impl SubspacesReader for MemSubspaces {
    fn has_subspace(&self, subspace_id: u64) -> bool {
        self.subspaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&subspace_id)
    }

    fn iterate_subspaces(&self, visit: Visit<'_, Subspace>) {
        let snapshot: Vec<Subspace> = self
            .subspaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for subspace in &snapshot {
            if visit(subspace).is_break() {
                break;
            }
        }
    }

    fn has_permission(
        &self,
        subspace_id: u64,
        section_id: u32,
        user: &Address,
        permission: Permission,
    ) -> bool {
        let is_owner = self
            .subspaces
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&subspace_id)
            .is_some_and(|subspace| &subspace.owner == user);
        is_owner
            || self.granted(subspace_id, section_id, user, permission)
            || self.granted(subspace_id, ROOT_SECTION_ID, user, permission)
    }
}

#[derive(Debug, Default)]
pub struct MemPosts {
    posts: RwLock<BTreeMap<(u64, u64), Post>>,
}

impl MemPosts {
    pub fn insert(&self, post: Post) {
        self.posts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((post.subspace_id, post.id), post);
    }

    pub fn remove(&self, subspace_id: u64, post_id: u64) -> Option<Post> {
        self.posts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&(subspace_id, post_id))
    }

    pub fn subspace_post_ids(&self, subspace_id: u64) -> Vec<u64> {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|(s, _)| *s == subspace_id)
            .map(|(_, p)| *p)
            .collect()
    }
}

impl PostsReader for MemPosts {
    fn has_post(&self, subspace_id: u64, post_id: u64) -> bool {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&(subspace_id, post_id))
    }

    fn get_post(&self, subspace_id: u64, post_id: u64) -> Option<Post> {
        self.posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(subspace_id, post_id))
            .cloned()
    }

    fn iterate_posts(&self, visit: Visit<'_, Post>) {
        let snapshot: Vec<Post> = self
            .posts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        for post in &snapshot {
            if visit(post).is_break() {
                break;
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemRelationships {
    blocks: RwLock<HashSet<(Address, Address, u64)>>,
}

impl MemRelationships {
    pub fn block(&self, blocker: &Address, user: &Address, subspace_id: u64) {
        self.blocks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((blocker.clone(), user.clone(), subspace_id));
    }
}

impl RelationshipsReader for MemRelationships {
    fn has_user_blocked(&self, blocker: &Address, user: &Address, subspace_id: u64) -> bool {
        self.blocks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&(blocker.clone(), user.clone(), subspace_id))
    }
}

#[derive(Debug, Default)]
pub struct MemProfiles {
    profiles: RwLock<HashSet<Address>>,
}

impl MemProfiles {
    pub fn insert(&self, user: &Address) {
        self.profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user.clone());
    }
}

impl ProfilesReader for MemProfiles {
    fn has_profile(&self, user: &Address) -> bool {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(user)
    }
}
