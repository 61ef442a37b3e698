//! Outbound ports (driven side)
//!
//! Capabilities the reports module consumes from the modules that own
//! subspaces, posts, profiles and the social graph.

use serde::{Deserialize, Serialize};
use shared_types::{Address, PermissionName, PostId, SubspaceId, Timestamp};

/// Tenant registry: subspace existence and permission resolution.
pub trait SubspacesRegistry: Send + Sync {
    fn has_subspace(&self, subspace_id: SubspaceId) -> bool;

    /// Whether `user` holds `permission` inside the subspace.
    fn has_permission(
        &self,
        subspace_id: SubspaceId,
        user: &Address,
        permission: &PermissionName,
    ) -> bool;

    /// Every existing subspace, in ascending id order.
    fn subspace_ids(&self) -> Vec<SubspaceId>;
}

/// The part of a post the reports module needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInfo {
    pub subspace_id: SubspaceId,
    pub id: PostId,
    pub owner: Address,
}

/// Content registry.
pub trait PostsRegistry: Send + Sync {
    fn get_post(&self, subspace_id: SubspaceId, post_id: PostId) -> Option<PostInfo>;

    fn has_post(&self, subspace_id: SubspaceId, post_id: PostId) -> bool {
        self.get_post(subspace_id, post_id).is_some()
    }
}

/// Social graph registry.
pub trait RelationshipsRegistry: Send + Sync {
    /// Whether `blocker` has blocked `user` inside the subspace.
    fn has_user_blocked(&self, blocker: &Address, user: &Address, subspace_id: SubspaceId)
        -> bool;
}

/// User profiles registry.
pub trait ProfilesRegistry: Send + Sync {
    /// Whether `user` has created a profile.
    fn has_profile(&self, user: &Address) -> bool;
}

/// Source of the block time stamped on new reports.
pub trait TimeSource: Send + Sync {
    /// Current timestamp in seconds since epoch.
    fn now(&self) -> Timestamp;
}
