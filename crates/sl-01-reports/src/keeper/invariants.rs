//! Consistency sweep over the module state.
//!
//! Every check visits each stored record once and reports violations as
//! data: `(report, broken)`. A check never fails, even on a store fault.

use super::{decode, ReportsKeeper};
use crate::domain::entities::{Reason, Report, ReportTarget};
use crate::domain::errors::ReportsError;
use crate::domain::keys::{
    content_key, decode_report_id, split_reason_key, split_report_key, subspace_from_key,
    KeyPrefix,
};
use shared_types::{KeyValueStore, ReasonId, ReportId, SubspaceId};
use tracing::warn;

pub const MODULE_NAME: &str = "reports";

/// A named consistency check.
pub type InvariantCheck = fn(&ReportsKeeper, &dyn KeyValueStore) -> (String, bool);

/// Every check of the module, in execution order.
pub fn registered_invariants() -> Vec<(&'static str, InvariantCheck)> {
    vec![
        ("valid-subspaces", valid_subspaces),
        ("valid-reasons", valid_reasons),
        ("valid-reports", valid_reports),
        ("valid-content-index", valid_content_index),
    ]
}

fn format_invariant(name: &str, message: &str) -> String {
    format!("{MODULE_NAME}: {name} invariant\n{message}\n")
}

fn outcome(
    name: &str,
    subject: &str,
    violations: Result<Vec<String>, ReportsError>,
) -> (String, bool) {
    let violations = violations.unwrap_or_else(|err| vec![format!("unable to read store: {err}")]);
    let broken = !violations.is_empty();
    if broken {
        warn!(invariant = name, violations = violations.len(), "Invariant broken");
    }

    let mut message = String::new();
    if broken {
        message.push_str(&format!("the following {subject} are invalid:\n"));
        for violation in &violations {
            message.push_str(violation);
            message.push('\n');
        }
    }
    (format_invariant(name, &message), broken)
}

impl ReportsKeeper {
    /// Run every registered check and merge the outcomes.
    pub fn all_invariants(&self, store: &dyn KeyValueStore) -> (String, bool) {
        let mut report = String::new();
        let mut broken = false;
        for (_, check) in registered_invariants() {
            let (message, check_broken) = check(self, store);
            report.push_str(&message);
            broken |= check_broken;
        }
        (report, broken)
    }

    fn subspace_violations(&self, store: &dyn KeyValueStore) -> Result<Vec<String>, ReportsError> {
        let mut violations = Vec::new();
        for subspace_id in self.subspaces.subspace_ids() {
            if !self.has_next_reason_id(store, subspace_id)? {
                violations.push(format!("subspace id: {subspace_id}: next reason id not set"));
            }
            if !self.has_next_report_id(store, subspace_id)? {
                violations.push(format!("subspace id: {subspace_id}: next report id not set"));
            }
        }
        Ok(violations)
    }

    fn reason_violations(&self, store: &dyn KeyValueStore) -> Result<Vec<String>, ReportsError> {
        let mut violations = Vec::new();
        for (key, value) in store.prefix_scan(KeyPrefix::Reason.as_bytes())? {
            let Some((subspace_id, reason_id)) = split_reason_key(&key) else {
                violations.push(format!("malformed reason key: {key:?}"));
                continue;
            };
            let problem = match decode::<Reason>(&value) {
                Ok(reason) => self.reason_problem(store, subspace_id, reason_id, &reason)?,
                Err(err) => Some(err.to_string()),
            };
            if let Some(problem) = problem {
                violations.push(format!(
                    "subspace id: {subspace_id}, reason id: {reason_id}: {problem}"
                ));
            }
        }
        Ok(violations)
    }

    fn reason_problem(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        reason_id: ReasonId,
        reason: &Reason,
    ) -> Result<Option<String>, ReportsError> {
        if reason.subspace_id != subspace_id || reason.id != reason_id {
            return Ok(Some(format!(
                "stored under the wrong key (record says subspace {}, id {})",
                reason.subspace_id, reason.id
            )));
        }
        if let Err(err) = reason.validate() {
            return Ok(Some(err.to_string()));
        }
        if !self.has_subspace(subspace_id) {
            return Ok(Some("subspace does not exist".to_string()));
        }
        if !self.has_next_reason_id(store, subspace_id)? {
            return Ok(Some("next reason id not set".to_string()));
        }
        let next = self.get_next_reason_id(store, subspace_id)?;
        if reason_id >= next {
            return Ok(Some(format!("id is not lower than next reason id {next}")));
        }
        Ok(None)
    }

    fn report_violations(&self, store: &dyn KeyValueStore) -> Result<Vec<String>, ReportsError> {
        let mut violations = Vec::new();
        for (key, value) in store.prefix_scan(KeyPrefix::Report.as_bytes())? {
            let Some((subspace_id, report_id)) = split_report_key(&key) else {
                violations.push(format!("malformed report key: {key:?}"));
                continue;
            };
            let problem = match decode::<Report>(&value) {
                Ok(report) => self.report_problem(store, subspace_id, report_id, &report)?,
                Err(err) => Some(err.to_string()),
            };
            if let Some(problem) = problem {
                violations.push(format!(
                    "subspace id: {subspace_id}, report id: {report_id}: {problem}"
                ));
            }
        }
        Ok(violations)
    }

    fn report_problem(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        report_id: ReportId,
        report: &Report,
    ) -> Result<Option<String>, ReportsError> {
        if report.subspace_id != subspace_id || report.id != report_id {
            return Ok(Some(format!(
                "stored under the wrong key (record says subspace {}, id {})",
                report.subspace_id, report.id
            )));
        }
        if let Err(err) = report.validate() {
            return Ok(Some(err.to_string()));
        }
        if !self.has_subspace(subspace_id) {
            return Ok(Some("subspace does not exist".to_string()));
        }
        if !self.has_next_report_id(store, subspace_id)? {
            return Ok(Some("next report id not set".to_string()));
        }
        let next = self.get_next_report_id(store, subspace_id)?;
        if report_id >= next {
            return Ok(Some(format!("id is not lower than next report id {next}")));
        }
        for reason_id in &report.reasons_ids {
            if !self.has_reason(store, subspace_id, *reason_id)? {
                return Ok(Some(format!("reason {reason_id} does not exist")));
            }
        }
        if let ReportTarget::Post { post_id } = report.target {
            if !self.posts.has_post(subspace_id, post_id) {
                return Ok(Some(format!("post {post_id} does not exist")));
            }
        }
        Ok(None)
    }

    fn content_index_violations(
        &self,
        store: &dyn KeyValueStore,
    ) -> Result<Vec<String>, ReportsError> {
        let mut violations = Vec::new();
        for prefix in [KeyPrefix::PostReports, KeyPrefix::UserReports] {
            for (key, value) in store.prefix_scan(prefix.as_bytes())? {
                let (Some(subspace_id), Some(report_id)) =
                    (subspace_from_key(&key), decode_report_id(&value))
                else {
                    violations.push(format!("malformed content index entry: {key:?}"));
                    continue;
                };
                match self.get_report(store, subspace_id, report_id)? {
                    None => violations.push(format!(
                        "subspace id: {subspace_id}: index points at missing report {report_id}"
                    )),
                    Some(report)
                        if content_key(subspace_id, &report.target, &report.reporter) != key =>
                    {
                        violations.push(format!(
                            "subspace id: {subspace_id}: index entry does not match report {report_id}"
                        ))
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(violations)
    }
}

/// Every subspace known to the registry has both counters.
pub fn valid_subspaces(keeper: &ReportsKeeper, store: &dyn KeyValueStore) -> (String, bool) {
    outcome(
        "valid-subspaces",
        "subspaces",
        keeper.subspace_violations(store),
    )
}

/// Every reason is well formed, lives in an existing subspace and has an
/// id below its subspace counter.
pub fn valid_reasons(keeper: &ReportsKeeper, store: &dyn KeyValueStore) -> (String, bool) {
    outcome("valid-reasons", "reasons", keeper.reason_violations(store))
}

/// Every report is well formed, lives in an existing subspace, has an id
/// below its subspace counter, cites existing reasons and targets an
/// existing post.
pub fn valid_reports(keeper: &ReportsKeeper, store: &dyn KeyValueStore) -> (String, bool) {
    outcome("valid-reports", "reports", keeper.report_violations(store))
}

/// Every content index entry points at the report it describes.
pub fn valid_content_index(keeper: &ReportsKeeper, store: &dyn KeyValueStore) -> (String, bool) {
    outcome(
        "valid-content-index",
        "content index entries",
        keeper.content_index_violations(store),
    )
}
