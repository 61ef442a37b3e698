//! Named permissions owned by the reports module.

use crate::domain::errors::ReportsError;
use shared_types::{PermissionError, PermissionName, PermissionRegistry, PermissionRegistryBuilder};

/// Allows users to report other users or content.
pub const PERMISSION_REPORT_CONTENT: &str = "REPORT_CONTENT";

/// Allows users to delete the reports they created.
pub const PERMISSION_DELETE_OWN_REPORTS: &str = "DELETE_OWN_REPORTS";

/// Allows moderators to delete any report.
pub const PERMISSION_MANAGE_REPORTS: &str = "MANAGE_REPORTS";

/// Allows moderators to add, support and remove reasons.
pub const PERMISSION_MANAGE_REASONS: &str = "MANAGE_REASONS";

const ALL: [&str; 4] = [
    PERMISSION_REPORT_CONTENT,
    PERMISSION_DELETE_OWN_REPORTS,
    PERMISSION_MANAGE_REPORTS,
    PERMISSION_MANAGE_REASONS,
];

/// Register the reports permissions on the startup builder.
pub fn register_permissions(builder: &mut PermissionRegistryBuilder) -> Result<(), PermissionError> {
    for name in ALL {
        builder.register(name)?;
    }
    Ok(())
}

/// Resolved permission handles used by the keeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportsPermissions {
    pub report_content: PermissionName,
    pub delete_own_reports: PermissionName,
    pub manage_reports: PermissionName,
    pub manage_reasons: PermissionName,
}

impl ReportsPermissions {
    /// Resolve every reports permission, failing if one was not registered.
    pub fn resolve(registry: &PermissionRegistry) -> Result<Self, ReportsError> {
        Ok(Self {
            report_content: registry.resolve(PERMISSION_REPORT_CONTENT)?,
            delete_own_reports: registry.resolve(PERMISSION_DELETE_OWN_REPORTS)?,
            manage_reports: registry.resolve(PERMISSION_MANAGE_REPORTS)?,
            manage_reasons: registry.resolve(PERMISSION_MANAGE_REASONS)?,
        })
    }
}
