//! State transition messages.
//!
//! Each message carries a stateless `validate_basic` that runs before any
//! store access.

use crate::domain::entities::{validate_reasons_ids, ReportTarget};
use crate::domain::errors::ReportsError;
use crate::domain::params::Params;
use serde::{Deserialize, Serialize};
use shared_types::{Address, ReasonId, ReportId, SubspaceId, Timestamp};
use sl_02_subspace_authz::ScopedMsg;

pub const TYPE_URL_CREATE_REPORT: &str = "/subspace_ledger.reports.v1.MsgCreateReport";
pub const TYPE_URL_DELETE_REPORT: &str = "/subspace_ledger.reports.v1.MsgDeleteReport";
pub const TYPE_URL_SUPPORT_STANDARD_REASON: &str =
    "/subspace_ledger.reports.v1.MsgSupportStandardReason";
pub const TYPE_URL_ADD_REASON: &str = "/subspace_ledger.reports.v1.MsgAddReason";
pub const TYPE_URL_REMOVE_REASON: &str = "/subspace_ledger.reports.v1.MsgRemoveReason";
pub const TYPE_URL_UPDATE_PARAMS: &str = "/subspace_ledger.reports.v1.MsgUpdateParams";

fn check_subspace_id(subspace_id: SubspaceId) -> Result<(), ReportsError> {
    if subspace_id == 0 {
        return Err(ReportsError::invalid("invalid subspace id: 0"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateReport {
    pub subspace_id: SubspaceId,
    pub reasons_ids: Vec<ReasonId>,
    pub message: String,
    pub target: ReportTarget,
    pub reporter: Address,
}

impl MsgCreateReport {
    pub fn validate_basic(&self) -> Result<(), ReportsError> {
        check_subspace_id(self.subspace_id)?;
        validate_reasons_ids(&self.reasons_ids)?;
        self.target.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateReportResponse {
    pub report_id: ReportId,
    pub creation_time: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDeleteReport {
    pub subspace_id: SubspaceId,
    pub report_id: ReportId,
    pub signer: Address,
}

impl MsgDeleteReport {
    pub fn validate_basic(&self) -> Result<(), ReportsError> {
        check_subspace_id(self.subspace_id)?;
        if self.report_id == 0 {
            return Err(ReportsError::invalid("invalid report id: 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSupportStandardReason {
    pub subspace_id: SubspaceId,
    pub standard_reason_id: ReasonId,
    pub signer: Address,
}

impl MsgSupportStandardReason {
    pub fn validate_basic(&self) -> Result<(), ReportsError> {
        check_subspace_id(self.subspace_id)?;
        if self.standard_reason_id == 0 {
            return Err(ReportsError::invalid("invalid standard reason id: 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSupportStandardReasonResponse {
    pub reason_id: ReasonId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddReason {
    pub subspace_id: SubspaceId,
    pub title: String,
    pub description: String,
    pub signer: Address,
}

impl MsgAddReason {
    pub fn validate_basic(&self) -> Result<(), ReportsError> {
        check_subspace_id(self.subspace_id)?;
        if self.title.trim().is_empty() {
            return Err(ReportsError::invalid("invalid reason title: empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddReasonResponse {
    pub reason_id: ReasonId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRemoveReason {
    pub subspace_id: SubspaceId,
    pub reason_id: ReasonId,
    pub signer: Address,
}

impl MsgRemoveReason {
    pub fn validate_basic(&self) -> Result<(), ReportsError> {
        check_subspace_id(self.subspace_id)?;
        if self.reason_id == 0 {
            return Err(ReportsError::invalid("invalid reason id: 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateParams {
    pub authority: Address,
    pub params: Params,
}

impl MsgUpdateParams {
    pub fn validate_basic(&self) -> Result<(), ReportsError> {
        self.params.validate()
    }
}

/// Any message handled by the reports module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportsMsg {
    CreateReport(MsgCreateReport),
    DeleteReport(MsgDeleteReport),
    SupportStandardReason(MsgSupportStandardReason),
    AddReason(MsgAddReason),
    RemoveReason(MsgRemoveReason),
    UpdateParams(MsgUpdateParams),
}

impl ReportsMsg {
    pub fn validate_basic(&self) -> Result<(), ReportsError> {
        match self {
            ReportsMsg::CreateReport(msg) => msg.validate_basic(),
            ReportsMsg::DeleteReport(msg) => msg.validate_basic(),
            ReportsMsg::SupportStandardReason(msg) => msg.validate_basic(),
            ReportsMsg::AddReason(msg) => msg.validate_basic(),
            ReportsMsg::RemoveReason(msg) => msg.validate_basic(),
            ReportsMsg::UpdateParams(msg) => msg.validate_basic(),
        }
    }

    /// The account that must sign the message.
    pub fn signer(&self) -> &Address {
        match self {
            ReportsMsg::CreateReport(msg) => &msg.reporter,
            ReportsMsg::DeleteReport(msg) => &msg.signer,
            ReportsMsg::SupportStandardReason(msg) => &msg.signer,
            ReportsMsg::AddReason(msg) => &msg.signer,
            ReportsMsg::RemoveReason(msg) => &msg.signer,
            ReportsMsg::UpdateParams(msg) => &msg.authority,
        }
    }
}

impl ScopedMsg for ReportsMsg {
    fn type_url(&self) -> &str {
        match self {
            ReportsMsg::CreateReport(_) => TYPE_URL_CREATE_REPORT,
            ReportsMsg::DeleteReport(_) => TYPE_URL_DELETE_REPORT,
            ReportsMsg::SupportStandardReason(_) => TYPE_URL_SUPPORT_STANDARD_REASON,
            ReportsMsg::AddReason(_) => TYPE_URL_ADD_REASON,
            ReportsMsg::RemoveReason(_) => TYPE_URL_REMOVE_REASON,
            ReportsMsg::UpdateParams(_) => TYPE_URL_UPDATE_PARAMS,
        }
    }

    fn scoped_subspace_id(&self) -> Option<SubspaceId> {
        match self {
            ReportsMsg::CreateReport(msg) => Some(msg.subspace_id),
            ReportsMsg::DeleteReport(msg) => Some(msg.subspace_id),
            ReportsMsg::SupportStandardReason(msg) => Some(msg.subspace_id),
            ReportsMsg::AddReason(msg) => Some(msg.subspace_id),
            ReportsMsg::RemoveReason(msg) => Some(msg.subspace_id),
            // Module-wide, not subspace scoped
            ReportsMsg::UpdateParams(_) => None,
        }
    }
}

/// Result of a successfully handled [`ReportsMsg`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportsResponse {
    CreateReport(MsgCreateReportResponse),
    DeleteReport,
    SupportStandardReason(MsgSupportStandardReasonResponse),
    AddReason(MsgAddReasonResponse),
    RemoveReason,
    UpdateParams,
}
