//! Error types for the reports module

use shared_bus::HookError;
use shared_types::{Address, KVStoreError, PermissionError, ReasonId, ReportId, SubspaceId};
use sl_02_subspace_authz::AuthzError;
use thiserror::Error;

/// Which per-subspace identifier counter is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Reason,
    Report,
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CounterKind::Reason => f.write_str("reason"),
            CounterKind::Report => f.write_str("report"),
        }
    }
}

/// All errors that can occur in the reports module
#[derive(Debug, Error)]
pub enum ReportsError {
    /// The subspace is not known to the subspaces registry
    #[error("Subspace with id {subspace_id} not found")]
    SubspaceNotFound { subspace_id: SubspaceId },

    #[error("Reason with id {reason_id} not found inside subspace {subspace_id}")]
    ReasonNotFound {
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    },

    #[error("Report with id {report_id} not found inside subspace {subspace_id}")]
    ReportNotFound {
        subspace_id: SubspaceId,
        report_id: ReportId,
    },

    #[error("Standard reason with id {standard_reason_id} could not be found")]
    StandardReasonNotFound { standard_reason_id: ReasonId },

    /// The signer lacks the permission required by the operation
    #[error("Permission denied: {user} cannot {action} inside subspace {subspace_id}")]
    PermissionDenied {
        subspace_id: SubspaceId,
        user: Address,
        action: &'static str,
    },

    /// Stateless or stateful validation failed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The subspace lifecycle hook never initialized the counter
    #[error("Initial {kind} id hasn't been set for subspace {subspace_id}")]
    UninitializedCounter {
        kind: CounterKind,
        subspace_id: SubspaceId,
    },

    /// The reporter already reported the same target
    #[error("{reporter} has already reported this target inside subspace {subspace_id}")]
    AlreadyReported {
        subspace_id: SubspaceId,
        reporter: Address,
    },

    /// The reported user (or post author) has blocked the reporter
    #[error("{blocker} has blocked {reporter} inside subspace {subspace_id}")]
    Blocked {
        subspace_id: SubspaceId,
        blocker: Address,
        reporter: Address,
    },

    /// Params update signed by someone other than the governance authority
    #[error("Invalid authority; expected {expected}, got {got}")]
    InvalidAuthority { expected: String, got: Address },

    /// A delegated execution was refused by its grant
    #[error("Authorization error: {0}")]
    Authz(#[from] AuthzError),

    /// A permission name could not be resolved from the registry
    #[error("Permission registry error: {0}")]
    Permission(#[from] PermissionError),

    #[error("Store error: {0}")]
    Store(#[from] KVStoreError),

    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ReportsError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl From<bincode::Error> for ReportsError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ReportsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
