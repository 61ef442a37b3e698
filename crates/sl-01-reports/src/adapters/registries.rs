//! In-memory registry adapters.
//!
//! Stand-ins for the subspaces, posts, profiles and relationships modules. The
//! subspaces and posts adapters own a hook chain and fire it on every
//! lifecycle change, exactly like the real modules do.

use crate::ports::outbound::{
    PostInfo, PostsRegistry, ProfilesRegistry, RelationshipsRegistry, SubspacesRegistry,
};
use parking_lot::RwLock;
use shared_bus::{
    HookError, MultiPostsHooks, MultiSubspacesHooks, PostsHooks, SubspacesHooks,
};
use shared_types::{Address, KeyValueStore, PermissionName, PostId, SubspaceId};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone)]
struct SubspaceEntry {
    owner: Address,
    grants: HashMap<Address, BTreeSet<PermissionName>>,
}

/// In-memory subspaces module.
///
/// The owner of a subspace implicitly holds every permission.
#[derive(Default)]
pub struct InMemorySubspaces {
    subspaces: RwLock<BTreeMap<SubspaceId, SubspaceEntry>>,
    hooks: RwLock<MultiSubspacesHooks>,
}

impl InMemorySubspaces {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lifecycle subscriber.
    pub fn register_hooks(&self, hooks: Box<dyn SubspacesHooks>) {
        self.hooks.write().register(hooks);
    }

    /// Create or update a subspace, then fire `after_subspace_saved`.
    ///
    /// If a subscriber fails the previous entry is put back.
    pub fn save_subspace(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        owner: Address,
    ) -> Result<(), HookError> {
        let previous = {
            let mut subspaces = self.subspaces.write();
            let previous = subspaces.get(&subspace_id).cloned();
            let grants = previous
                .as_ref()
                .map(|entry| entry.grants.clone())
                .unwrap_or_default();
            subspaces.insert(subspace_id, SubspaceEntry { owner, grants });
            previous
        };

        debug!(subspace_id, "Subspace saved");
        let result = self.hooks.read().after_subspace_saved(store, subspace_id);
        if result.is_err() {
            let mut subspaces = self.subspaces.write();
            match previous {
                Some(entry) => subspaces.insert(subspace_id, entry),
                None => subspaces.remove(&subspace_id),
            };
        }
        result
    }

    /// Delete a subspace, then fire `after_subspace_deleted`.
    ///
    /// If a subscriber fails the subspace is restored.
    pub fn delete_subspace(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), HookError> {
        let removed = self.subspaces.write().remove(&subspace_id);
        let Some(entry) = removed else {
            return Ok(());
        };

        debug!(subspace_id, "Subspace deleted");
        let result = self.hooks.read().after_subspace_deleted(store, subspace_id);
        if result.is_err() {
            self.subspaces.write().insert(subspace_id, entry);
        }
        result
    }

    /// Grant named permissions to a user.
    pub fn set_user_permissions(
        &self,
        subspace_id: SubspaceId,
        user: Address,
        permissions: impl IntoIterator<Item = PermissionName>,
    ) {
        if let Some(entry) = self.subspaces.write().get_mut(&subspace_id) {
            entry
                .grants
                .insert(user, permissions.into_iter().collect());
        }
    }
}

impl SubspacesRegistry for InMemorySubspaces {
    fn has_subspace(&self, subspace_id: SubspaceId) -> bool {
        self.subspaces.read().contains_key(&subspace_id)
    }

    fn has_permission(
        &self,
        subspace_id: SubspaceId,
        user: &Address,
        permission: &PermissionName,
    ) -> bool {
        let subspaces = self.subspaces.read();
        let Some(entry) = subspaces.get(&subspace_id) else {
            return false;
        };
        if entry.owner == *user {
            return true;
        }
        entry
            .grants
            .get(user)
            .is_some_and(|granted| granted.contains(permission))
    }

    fn subspace_ids(&self) -> Vec<SubspaceId> {
        self.subspaces.read().keys().copied().collect()
    }
}

/// In-memory posts module.
#[derive(Default)]
pub struct InMemoryPosts {
    posts: RwLock<BTreeMap<(SubspaceId, PostId), PostInfo>>,
    hooks: RwLock<MultiPostsHooks>,
}

impl InMemoryPosts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_hooks(&self, hooks: Box<dyn PostsHooks>) {
        self.hooks.write().register(hooks);
    }

    /// Create or update a post, then fire `after_post_saved`.
    pub fn save_post(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        post_id: PostId,
        owner: Address,
    ) -> Result<(), HookError> {
        let key = (subspace_id, post_id);
        let previous = self.posts.write().insert(
            key,
            PostInfo {
                subspace_id,
                id: post_id,
                owner,
            },
        );

        let result = self.hooks.read().after_post_saved(store, subspace_id, post_id);
        if result.is_err() {
            let mut posts = self.posts.write();
            match previous {
                Some(post) => posts.insert(key, post),
                None => posts.remove(&key),
            };
        }
        result
    }

    /// Delete a post, then fire `after_post_deleted`.
    pub fn delete_post(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        post_id: PostId,
    ) -> Result<(), HookError> {
        let removed = self.posts.write().remove(&(subspace_id, post_id));
        let Some(post) = removed else {
            return Ok(());
        };

        debug!(subspace_id, post_id, "Post deleted");
        let result = self.hooks.read().after_post_deleted(store, subspace_id, post_id);
        if result.is_err() {
            self.posts.write().insert((subspace_id, post_id), post);
        }
        result
    }
}

impl PostsRegistry for InMemoryPosts {
    fn get_post(&self, subspace_id: SubspaceId, post_id: PostId) -> Option<PostInfo> {
        self.posts.read().get(&(subspace_id, post_id)).cloned()
    }
}

/// In-memory profiles module (existence only).
#[derive(Debug, Default)]
pub struct InMemoryProfiles {
    profiles: RwLock<HashSet<Address>>,
}

impl InMemoryProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_profile(&self, user: Address) {
        self.profiles.write().insert(user);
    }

    pub fn delete_profile(&self, user: &Address) {
        self.profiles.write().remove(user);
    }
}

impl ProfilesRegistry for InMemoryProfiles {
    fn has_profile(&self, user: &Address) -> bool {
        self.profiles.read().contains(user)
    }
}

/// In-memory relationships module (blocks only).
#[derive(Debug, Default)]
pub struct InMemoryRelationships {
    blocks: RwLock<HashSet<(Address, Address, SubspaceId)>>,
}

impl InMemoryRelationships {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block_user(&self, blocker: Address, blocked: Address, subspace_id: SubspaceId) {
        self.blocks.write().insert((blocker, blocked, subspace_id));
    }

    pub fn unblock_user(&self, blocker: &Address, blocked: &Address, subspace_id: SubspaceId) {
        self.blocks
            .write()
            .remove(&(blocker.clone(), blocked.clone(), subspace_id));
    }
}

impl RelationshipsRegistry for InMemoryRelationships {
    fn has_user_blocked(
        &self,
        blocker: &Address,
        user: &Address,
        subspace_id: SubspaceId,
    ) -> bool {
        self.blocks
            .read()
            .contains(&(blocker.clone(), user.clone(), subspace_id))
    }
}
