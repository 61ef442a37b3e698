//! # Reports Keeper
//!
//! Owns every read and write of the reports module's key space. All
//! operations take the store of the running state transition, so writes
//! performed here (including cascades and hook fan-out) are committed or
//! discarded together with the transition.

mod counters;
mod genesis;
mod hooks;
mod invariants;
mod params;
mod reasons;
mod reports;

pub use hooks::ReportsKeeperHooks;
pub use invariants::{registered_invariants, InvariantCheck, MODULE_NAME};

use crate::domain::errors::ReportsError;
use crate::domain::permissions::ReportsPermissions;
use crate::ports::outbound::{
    PostsRegistry, ProfilesRegistry, RelationshipsRegistry, SubspacesRegistry,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared_bus::{MultiReportsHooks, ReportsHooks};
use shared_types::{
    Address, KVStoreError, KeyValueStore, PermissionName, PermissionRegistry, SubspaceId,
};
use std::sync::Arc;

/// External modules the keeper consults.
pub struct ReportsDependencies {
    pub subspaces: Arc<dyn SubspacesRegistry>,
    pub posts: Arc<dyn PostsRegistry>,
    pub profiles: Arc<dyn ProfilesRegistry>,
    pub relationships: Arc<dyn RelationshipsRegistry>,
}

pub struct ReportsKeeper {
    subspaces: Arc<dyn SubspacesRegistry>,
    posts: Arc<dyn PostsRegistry>,
    profiles: Arc<dyn ProfilesRegistry>,
    relationships: Arc<dyn RelationshipsRegistry>,
    permissions: ReportsPermissions,
    hooks: MultiReportsHooks,
}

impl ReportsKeeper {
    /// Build the keeper, resolving the reports permissions from the
    /// startup registry.
    pub fn new(
        deps: ReportsDependencies,
        registry: &PermissionRegistry,
    ) -> Result<Self, ReportsError> {
        Ok(Self {
            subspaces: deps.subspaces,
            posts: deps.posts,
            profiles: deps.profiles,
            relationships: deps.relationships,
            permissions: ReportsPermissions::resolve(registry)?,
            hooks: MultiReportsHooks::new(),
        })
    }

    /// Append a subscriber to the reports lifecycle chain.
    pub fn register_hooks(&mut self, hooks: Box<dyn ReportsHooks>) {
        self.hooks.register(hooks);
    }

    pub fn permissions(&self) -> &ReportsPermissions {
        &self.permissions
    }

    pub fn has_profile(&self, user: &Address) -> bool {
        self.profiles.has_profile(user)
    }

    pub fn has_subspace(&self, subspace_id: SubspaceId) -> bool {
        self.subspaces.has_subspace(subspace_id)
    }

    /// Report permissions are checked against the whole subspace.
    pub fn has_permission(
        &self,
        subspace_id: SubspaceId,
        user: &Address,
        permission: &PermissionName,
    ) -> bool {
        self.subspaces.has_permission(subspace_id, user, permission)
    }
}

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ReportsError> {
    Ok(bincode::serialize(value)?)
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ReportsError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Decode every value under `prefix`, in key order.
pub(crate) fn scan<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    prefix: &[u8],
) -> Result<Vec<T>, ReportsError> {
    store
        .prefix_scan(prefix)?
        .iter()
        .map(|(_, value)| decode(value))
        .collect()
}

pub(crate) fn corruption(message: String) -> ReportsError {
    ReportsError::Store(KVStoreError::CorruptionError { message })
}
