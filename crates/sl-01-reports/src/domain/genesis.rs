//! Genesis state of the reports module.

use crate::domain::entities::{Reason, Report};
use crate::domain::errors::ReportsError;
use crate::domain::params::Params;
use serde::{Deserialize, Serialize};
use shared_types::{ReasonId, ReportId, SubspaceId};
use std::collections::HashSet;

/// Next-id counters of one subspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubspaceDataEntry {
    pub subspace_id: SubspaceId,
    pub reason_id: ReasonId,
    pub report_id: ReportId,
}

impl SubspaceDataEntry {
    pub fn new(subspace_id: SubspaceId, reason_id: ReasonId, report_id: ReportId) -> Self {
        Self {
            subspace_id,
            reason_id,
            report_id,
        }
    }

    pub fn validate(&self) -> Result<(), ReportsError> {
        if self.subspace_id == 0 {
            return Err(ReportsError::invalid("invalid subspace id: 0"));
        }
        if self.reason_id == 0 {
            return Err(ReportsError::invalid(format!(
                "invalid next reason id for subspace {}: 0",
                self.subspace_id
            )));
        }
        if self.report_id == 0 {
            return Err(ReportsError::invalid(format!(
                "invalid next report id for subspace {}: 0",
                self.subspace_id
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub subspaces_data: Vec<SubspaceDataEntry>,
    pub reasons: Vec<Reason>,
    pub reports: Vec<Report>,
    pub params: Params,
}

impl GenesisState {
    pub fn new(
        subspaces_data: Vec<SubspaceDataEntry>,
        reasons: Vec<Reason>,
        reports: Vec<Report>,
        params: Params,
    ) -> Self {
        Self {
            subspaces_data,
            reasons,
            reports,
            params,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ReportsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ReportsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Structural validation. Referential integrity between reports and
    /// reasons is left to the invariant sweep.
    pub fn validate(&self) -> Result<(), ReportsError> {
        let mut subspaces = HashSet::new();
        for entry in &self.subspaces_data {
            if !subspaces.insert(entry.subspace_id) {
                return Err(ReportsError::invalid(format!(
                    "duplicated subspace data: {}",
                    entry.subspace_id
                )));
            }
            entry.validate()?;
        }

        let mut reasons = HashSet::new();
        for reason in &self.reasons {
            if !reasons.insert((reason.subspace_id, reason.id)) {
                return Err(ReportsError::invalid(format!(
                    "duplicated reason: subspace id {}, reason id {}",
                    reason.subspace_id, reason.id
                )));
            }
            reason.validate()?;
        }

        let mut reports = HashSet::new();
        for report in &self.reports {
            if !reports.insert((report.subspace_id, report.id)) {
                return Err(ReportsError::invalid(format!(
                    "duplicated report: subspace id {}, report id {}",
                    report.subspace_id, report.id
                )));
            }
            report.validate()?;
        }

        self.params.validate()
    }
}
