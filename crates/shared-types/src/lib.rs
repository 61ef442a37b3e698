//! # Shared Types Crate
//!
//! Types shared by every subspace-scoped module of the ledger.
//!
//! ## Contents
//!
//! - **Entities**: identifier aliases and the validated [`Address`].
//! - **Store**: the [`KeyValueStore`] port, the in-memory adapter and the
//!   write-buffering [`CacheStore`] used to make a state transition atomic.
//! - **Permissions**: the fixed-width [`Permission`] bitmask algebra.
//! - **Registry**: the [`PermissionRegistry`] of named permissions, built once
//!   at startup and passed explicitly to the modules that resolve names.

pub mod entities;
pub mod errors;
pub mod permissions;
pub mod registry;
pub mod store;

pub use entities::*;
pub use errors::*;
pub use permissions::Permission;
pub use registry::{PermissionName, PermissionRegistry, PermissionRegistryBuilder};
pub use store::{BatchOperation, CacheStore, InMemoryKVStore, KeyValueStore};
