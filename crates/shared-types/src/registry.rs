//! # Permission Registry
//!
//! Named permissions are registered by each module on a
//! [`PermissionRegistryBuilder`] at startup. The built [`PermissionRegistry`]
//! is immutable and handed explicitly to every component that resolves
//! permission names; there is no process-global table.
//!
//! The registry also carries the mapping from legacy bitmask flags to named
//! permissions, used when older grants stored as raw bitmasks are migrated.

use crate::errors::PermissionError;
use crate::permissions::{split, Permission};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, warn};

/// Canonical (upper-case) name of a registered permission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionName(String);

impl PermissionName {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn canonical(name: &str) -> Result<Self, PermissionError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PermissionError::EmptyName);
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }
}

impl fmt::Display for PermissionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Legacy flag to named permission mapping of the subspaces module.
const SUBSPACE_LEGACY_NAMES: [(Permission, &str); 7] = [
    (Permission::WRITE, "WRITE_CONTENT"),
    (Permission::MODERATE_CONTENT, "MODERATE_CONTENT"),
    (Permission::CHANGE_INFO, "EDIT_SUBSPACE"),
    (Permission::MANAGE_GROUPS, "MANAGE_GROUPS"),
    (Permission::SET_PERMISSIONS, "SET_PERMISSIONS"),
    (Permission::DELETE_SUBSPACE, "DELETE_SUBSPACE"),
    (Permission::EVERYTHING, "EVERYTHING"),
];

/// Collects permission registrations before the registry is frozen.
#[derive(Debug, Default)]
pub struct PermissionRegistryBuilder {
    names: BTreeSet<PermissionName>,
    legacy: BTreeMap<Permission, PermissionName>,
}

impl PermissionRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named permission. Names are case-insensitive.
    pub fn register(&mut self, name: &str) -> Result<PermissionName, PermissionError> {
        let canonical = PermissionName::canonical(name)?;
        if !self.names.insert(canonical.clone()) {
            return Err(PermissionError::AlreadyRegistered(canonical.0));
        }
        debug!(permission = %canonical, "Permission registered");
        Ok(canonical)
    }

    /// Register a named permission that replaces a legacy bitmask flag.
    pub fn register_legacy(
        &mut self,
        flag: Permission,
        name: &str,
    ) -> Result<PermissionName, PermissionError> {
        let canonical = self.register(name)?;
        self.legacy.insert(flag, canonical.clone());
        Ok(canonical)
    }

    /// Register the permissions owned by the subspaces module.
    pub fn with_subspace_defaults(mut self) -> Result<Self, PermissionError> {
        for (flag, name) in SUBSPACE_LEGACY_NAMES {
            self.register_legacy(flag, name)?;
        }
        Ok(self)
    }

    pub fn build(self) -> PermissionRegistry {
        PermissionRegistry {
            names: self.names,
            legacy: self.legacy,
        }
    }
}

/// Frozen set of named permissions.
#[derive(Debug, Clone)]
pub struct PermissionRegistry {
    names: BTreeSet<PermissionName>,
    legacy: BTreeMap<Permission, PermissionName>,
}

impl PermissionRegistry {
    pub fn builder() -> PermissionRegistryBuilder {
        PermissionRegistryBuilder::new()
    }

    /// Resolve a case-insensitive name to its registered canonical form.
    pub fn resolve(&self, name: &str) -> Result<PermissionName, PermissionError> {
        let canonical = PermissionName::canonical(name)?;
        if self.names.contains(&canonical) {
            Ok(canonical)
        } else {
            Err(PermissionError::UnknownPermission(name.to_string()))
        }
    }

    pub fn contains(&self, name: &PermissionName) -> bool {
        self.names.contains(name)
    }

    /// Every registered name, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &PermissionName> {
        self.names.iter()
    }

    /// Translate a legacy bitmask grant into named permissions.
    ///
    /// Unknown bits are dropped; flags with no registered replacement are
    /// skipped with a warning.
    pub fn migrate_legacy(&self, bitmask: Permission) -> Vec<PermissionName> {
        split(bitmask)
            .into_iter()
            .filter_map(|flag| match self.legacy.get(&flag) {
                Some(name) => Some(name.clone()),
                None => {
                    warn!(bits = flag.bits(), "No named permission for legacy flag");
                    None
                }
            })
            .collect()
    }
}
