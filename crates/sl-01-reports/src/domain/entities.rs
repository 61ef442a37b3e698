//! Core entities for the reports module

use crate::domain::errors::ReportsError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, PostId, ReasonId, ReportId, SubspaceId, Timestamp};
use std::collections::HashSet;

/// A subspace-local moderation category that reports cite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub subspace_id: SubspaceId,
    pub id: ReasonId,
    pub title: String,
    pub description: String,
}

impl Reason {
    pub fn new(
        subspace_id: SubspaceId,
        id: ReasonId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            subspace_id,
            id,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ReportsError> {
        if self.subspace_id == 0 {
            return Err(ReportsError::invalid("invalid subspace id: 0"));
        }
        if self.id == 0 {
            return Err(ReportsError::invalid("invalid reason id: 0"));
        }
        if self.title.trim().is_empty() {
            return Err(ReportsError::invalid("invalid reason title: empty"));
        }
        Ok(())
    }
}

/// A global reason template held in the module params.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardReason {
    pub id: ReasonId,
    pub title: String,
    pub description: String,
}

impl StandardReason {
    pub fn new(id: ReasonId, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ReportsError> {
        if self.id == 0 {
            return Err(ReportsError::invalid("invalid standard reason id: 0"));
        }
        if self.title.trim().is_empty() {
            return Err(ReportsError::invalid(format!(
                "invalid standard reason title: standard reason {} has an empty title",
                self.id
            )));
        }
        Ok(())
    }
}

/// What a report accuses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportTarget {
    /// A user, identified by address.
    User { user: Address },
    /// A post inside the report's subspace.
    Post { post_id: PostId },
}

impl ReportTarget {
    pub fn user(user: Address) -> Self {
        Self::User { user }
    }

    pub fn post(post_id: PostId) -> Self {
        Self::Post { post_id }
    }

    /// Stateless validation; post existence is checked by the keeper.
    pub fn validate(&self) -> Result<(), ReportsError> {
        match self {
            // Address format is enforced on construction
            ReportTarget::User { .. } => Ok(()),
            ReportTarget::Post { post_id } => {
                if *post_id == 0 {
                    return Err(ReportsError::invalid("invalid post id: 0"));
                }
                Ok(())
            }
        }
    }
}

/// A record accusing a target of violating one or more reasons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub subspace_id: SubspaceId,
    pub id: ReportId,
    pub reasons_ids: Vec<ReasonId>,
    pub message: String,
    pub target: ReportTarget,
    pub reporter: Address,
    pub creation_time: Timestamp,
}

impl Report {
    pub fn new(
        subspace_id: SubspaceId,
        id: ReportId,
        reasons_ids: Vec<ReasonId>,
        message: impl Into<String>,
        target: ReportTarget,
        reporter: Address,
        creation_time: Timestamp,
    ) -> Self {
        Self {
            subspace_id,
            id,
            reasons_ids,
            message: message.into(),
            target,
            reporter,
            creation_time,
        }
    }

    pub fn validate(&self) -> Result<(), ReportsError> {
        if self.subspace_id == 0 {
            return Err(ReportsError::invalid("invalid subspace id: 0"));
        }
        if self.id == 0 {
            return Err(ReportsError::invalid("invalid report id: 0"));
        }
        validate_reasons_ids(&self.reasons_ids)?;
        self.target.validate()?;
        if self.creation_time == 0 {
            return Err(ReportsError::invalid("invalid report creation time: 0"));
        }
        Ok(())
    }
}

/// Non-empty, zero-free, duplicate-free reason id list.
pub fn validate_reasons_ids(reasons_ids: &[ReasonId]) -> Result<(), ReportsError> {
    if reasons_ids.is_empty() {
        return Err(ReportsError::invalid("reasons ids cannot be empty"));
    }

    let mut seen = HashSet::with_capacity(reasons_ids.len());
    for id in reasons_ids {
        if *id == 0 {
            return Err(ReportsError::invalid("invalid reason id: 0"));
        }
        if !seen.insert(*id) {
            return Err(ReportsError::invalid(format!("duplicated reason id: {id}")));
        }
    }
    Ok(())
}
