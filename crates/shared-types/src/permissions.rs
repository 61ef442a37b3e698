//! # Permission Bitmask Algebra
//!
//! Fixed-width capability flags and the pure functions over them. Raw
//! bitmasks may carry bits that are not (or no longer) defined; `sanitize`
//! drops them and `validate` detects them.
//!
//! | Flag | Bit |
//! |------|-----|
//! | `NOTHING` | `0` |
//! | `WRITE` | `1 << 0` |
//! | `MODERATE_CONTENT` | `1 << 1` |
//! | `CHANGE_INFO` | `1 << 2` |
//! | `MANAGE_GROUPS` | `1 << 3` |
//! | `SET_PERMISSIONS` | `1 << 4` |
//! | `DELETE_SUBSPACE` | `1 << 5` |
//! | `EVERYTHING` | all of the above |

use crate::errors::PermissionError;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

bitflags! {
    /// Capability flags granted to a user inside a subspace.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Permission: u32 {
        const WRITE = 0b00_0001;
        const MODERATE_CONTENT = 0b00_0010;
        const CHANGE_INFO = 0b00_0100;
        const MANAGE_GROUPS = 0b00_1000;
        const SET_PERMISSIONS = 0b01_0000;
        const DELETE_SUBSPACE = 0b10_0000;
        const EVERYTHING = Self::WRITE.bits()
            | Self::MODERATE_CONTENT.bits()
            | Self::CHANGE_INFO.bits()
            | Self::MANAGE_GROUPS.bits()
            | Self::SET_PERMISSIONS.bits()
            | Self::DELETE_SUBSPACE.bits();
    }
}

/// Individual defined flags in ascending bit order.
const SINGLE_FLAGS: [(Permission, &str); 6] = [
    (Permission::WRITE, "WRITE"),
    (Permission::MODERATE_CONTENT, "MODERATE_CONTENT"),
    (Permission::CHANGE_INFO, "CHANGE_INFO"),
    (Permission::MANAGE_GROUPS, "MANAGE_GROUPS"),
    (Permission::SET_PERMISSIONS, "SET_PERMISSIONS"),
    (Permission::DELETE_SUBSPACE, "DELETE_SUBSPACE"),
];

const NOTHING_NAME: &str = "NOTHING";
const EVERYTHING_NAME: &str = "EVERYTHING";

impl Permission {
    /// No capability at all.
    pub const NOTHING: Self = Self::empty();

    /// Build a permission from raw bits, keeping unknown bits.
    pub const fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// Individual defined flags in ascending bit order.
    pub fn single_flags() -> impl Iterator<Item = Permission> {
        SINGLE_FLAGS.iter().map(|(flag, _)| *flag)
    }
}

/// Bitwise OR of every given permission.
pub fn combine(permissions: impl IntoIterator<Item = Permission>) -> Permission {
    permissions
        .into_iter()
        .fold(Permission::NOTHING, |acc, p| acc | p)
}

/// Drop every bit that does not belong to a defined flag.
pub fn sanitize(permission: Permission) -> Permission {
    Permission::from_bits_truncate(permission.bits())
}

/// Whether the permission only carries defined bits.
pub fn validate(permission: Permission) -> bool {
    sanitize(permission) == permission
}

/// Decompose a permission into its defined flags.
///
/// `NOTHING` splits into an empty list, anything containing every defined
/// flag splits into `[EVERYTHING]`, otherwise the set flags are returned in
/// ascending bit order. Unknown bits are ignored.
pub fn split(permission: Permission) -> Vec<Permission> {
    let sanitized = sanitize(permission);
    if sanitized.is_empty() {
        return Vec::new();
    }
    if sanitized.contains(Permission::EVERYTHING) {
        return vec![Permission::EVERYTHING];
    }

    Permission::single_flags()
        .filter(|flag| sanitized.contains(*flag))
        .collect()
}

/// Case-insensitive name lookup over the closed flag set.
pub fn parse(name: &str) -> Result<Permission, PermissionError> {
    let normalized = name.trim().to_ascii_uppercase();
    match normalized.as_str() {
        NOTHING_NAME => Ok(Permission::NOTHING),
        EVERYTHING_NAME => Ok(Permission::EVERYTHING),
        other => SINGLE_FLAGS
            .iter()
            .find(|(_, flag_name)| *flag_name == other)
            .map(|(flag, _)| *flag)
            .ok_or_else(|| PermissionError::UnknownPermission(name.to_string())),
    }
}

/// Canonical name of a single flag, `NOTHING` or `EVERYTHING`.
pub fn serialize(permission: Permission) -> Result<&'static str, PermissionError> {
    if permission == Permission::NOTHING {
        return Ok(NOTHING_NAME);
    }
    if permission == Permission::EVERYTHING {
        return Ok(EVERYTHING_NAME);
    }
    SINGLE_FLAGS
        .iter()
        .find(|(flag, _)| *flag == permission)
        .map(|(_, name)| *name)
        .ok_or(PermissionError::NoSingleName {
            bits: permission.bits(),
        })
}

impl FromStr for Permission {
    type Err = PermissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
