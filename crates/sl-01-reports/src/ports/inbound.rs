//! Inbound ports (driving side)
//!
//! The message and query surfaces of the reports module. Both operate on
//! the store handed in by the caller; messages additionally collect the
//! events of the transition.

use crate::domain::entities::{Reason, Report, ReportTarget};
use crate::domain::errors::ReportsError;
use crate::domain::msgs::{
    MsgAddReason, MsgAddReasonResponse, MsgCreateReport, MsgCreateReportResponse, MsgDeleteReport,
    MsgRemoveReason, MsgSupportStandardReason, MsgSupportStandardReasonResponse, MsgUpdateParams,
};
use crate::domain::params::Params;
use serde::{Deserialize, Serialize};
use shared_bus::EventManager;
use shared_types::{Address, KeyValueStore, ReasonId, ReportId, SubspaceId};

/// State transition handlers.
pub trait ReportsMsgApi {
    fn create_report(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgCreateReport,
    ) -> Result<MsgCreateReportResponse, ReportsError>;

    fn delete_report(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgDeleteReport,
    ) -> Result<(), ReportsError>;

    fn support_standard_reason(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgSupportStandardReason,
    ) -> Result<MsgSupportStandardReasonResponse, ReportsError>;

    fn add_reason(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgAddReason,
    ) -> Result<MsgAddReasonResponse, ReportsError>;

    fn remove_reason(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgRemoveReason,
    ) -> Result<(), ReportsError>;

    fn update_params(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgUpdateParams,
    ) -> Result<(), ReportsError>;
}

/// Offset based page selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub offset: usize,
    /// `None` uses the configured default page size.
    pub limit: Option<usize>,
}

impl PageRequest {
    pub fn new(offset: usize, limit: usize) -> Self {
        Self {
            offset,
            limit: Some(limit),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse {
    /// Offset of the next page, `None` on the last page.
    pub next_offset: Option<usize>,
    /// Number of matching records across all pages.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReportsRequest {
    pub subspace_id: SubspaceId,
    pub target: Option<ReportTarget>,
    pub reporter: Option<Address>,
    pub pagination: Option<PageRequest>,
}

impl QueryReportsRequest {
    pub fn new(subspace_id: SubspaceId) -> Self {
        Self {
            subspace_id,
            target: None,
            reporter: None,
            pagination: None,
        }
    }

    pub fn with_target(mut self, target: ReportTarget) -> Self {
        self.target = Some(target);
        self
    }

    pub fn with_reporter(mut self, reporter: Address) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn with_pagination(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReportsResponse {
    pub reports: Vec<Report>,
    pub pagination: PageResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReasonsRequest {
    pub subspace_id: SubspaceId,
    pub pagination: Option<PageRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReasonsResponse {
    pub reasons: Vec<Reason>,
    pub pagination: PageResponse,
}

/// Read-only query surface.
pub trait ReportsQueryApi {
    fn reports(
        &self,
        store: &dyn KeyValueStore,
        request: &QueryReportsRequest,
    ) -> Result<QueryReportsResponse, ReportsError>;

    fn report(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        report_id: ReportId,
    ) -> Result<Report, ReportsError>;

    fn reasons(
        &self,
        store: &dyn KeyValueStore,
        request: &QueryReasonsRequest,
    ) -> Result<QueryReasonsResponse, ReportsError>;

    fn reason(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    ) -> Result<Reason, ReportsError>;

    fn params(&self, store: &dyn KeyValueStore) -> Result<Params, ReportsError>;
}
