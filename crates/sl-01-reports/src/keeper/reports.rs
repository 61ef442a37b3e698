use super::{corruption, decode, encode, scan, ReportsKeeper};
use crate::domain::entities::{Report, ReportTarget};
use crate::domain::errors::ReportsError;
use crate::domain::keys::{
    content_key, decode_report_id, encode_report_id, post_reports_prefix, report_key,
    subspace_reports_prefix, target_reports_prefix, user_reports_prefix, KeyPrefix,
};
use shared_bus::ReportsHooks;
use shared_types::{Address, KeyValueStore, PostId, ReportId, SubspaceId};
use tracing::{debug, info};

impl ReportsKeeper {
    /// Stateful report validation: record shape plus the block rules.
    ///
    /// A user cannot be reported by someone they blocked, and a post cannot
    /// be reported by someone its author blocked.
    pub fn validate_report(&self, report: &Report) -> Result<(), ReportsError> {
        report.validate()?;

        let blocker = match &report.target {
            ReportTarget::User { user } => user.clone(),
            ReportTarget::Post { post_id } => {
                let post = self
                    .posts
                    .get_post(report.subspace_id, *post_id)
                    .ok_or_else(|| {
                        ReportsError::invalid(format!(
                            "post with id {post_id} does not exist inside subspace {}",
                            report.subspace_id
                        ))
                    })?;
                post.owner
            }
        };

        if self
            .relationships
            .has_user_blocked(&blocker, &report.reporter, report.subspace_id)
        {
            return Err(ReportsError::Blocked {
                subspace_id: report.subspace_id,
                blocker,
                reporter: report.reporter.clone(),
            });
        }
        Ok(())
    }

    /// Store a report and its content index entry.
    ///
    /// Overwriting a report drops the index entry of the previous record.
    pub fn save_report(
        &self,
        store: &mut dyn KeyValueStore,
        report: &Report,
    ) -> Result<(), ReportsError> {
        if let Some(previous) = self.get_report(store, report.subspace_id, report.id)? {
            self.remove_content_entry(store, &previous)?;
        }

        store.put(&report_key(report.subspace_id, report.id), &encode(report)?)?;
        store.put(
            &content_key(report.subspace_id, &report.target, &report.reporter),
            &encode_report_id(report.id),
        )?;
        debug!(
            subspace_id = report.subspace_id,
            report_id = report.id,
            "Report saved"
        );
        self.hooks
            .after_report_saved(store, report.subspace_id, report.id)?;
        Ok(())
    }

    pub fn has_report(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        report_id: ReportId,
    ) -> Result<bool, ReportsError> {
        Ok(store.exists(&report_key(subspace_id, report_id))?)
    }

    /// Whether `reporter` already reported `target` inside the subspace.
    pub fn has_reported(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        reporter: &Address,
        target: &ReportTarget,
    ) -> Result<bool, ReportsError> {
        Ok(store.exists(&content_key(subspace_id, target, reporter))?)
    }

    pub fn get_report(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        report_id: ReportId,
    ) -> Result<Option<Report>, ReportsError> {
        store
            .get(&report_key(subspace_id, report_id))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    /// The report filed by `reporter` against `target`, if any.
    pub fn get_report_by_content(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        reporter: &Address,
        target: &ReportTarget,
    ) -> Result<Option<Report>, ReportsError> {
        let Some(bytes) = store.get(&content_key(subspace_id, target, reporter))? else {
            return Ok(None);
        };
        let report_id = decode_report_id(&bytes)
            .ok_or_else(|| corruption(format!("malformed content index entry in subspace {subspace_id}")))?;
        self.get_report(store, subspace_id, report_id)
    }

    /// Delete a report and its content index entry.
    ///
    /// Deleting a missing report is a no-op.
    pub fn delete_report(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        report_id: ReportId,
    ) -> Result<(), ReportsError> {
        let Some(report) = self.get_report(store, subspace_id, report_id)? else {
            return Ok(());
        };

        store.delete(&report_key(subspace_id, report_id))?;
        self.remove_content_entry(store, &report)?;
        info!(subspace_id, report_id, "Report deleted");
        self.hooks
            .after_report_deleted(store, subspace_id, report_id)?;
        Ok(())
    }

    /// Drop the index entry of `report` unless it already points at a newer
    /// record for the same `(target, reporter)` pair.
    fn remove_content_entry(
        &self,
        store: &mut dyn KeyValueStore,
        report: &Report,
    ) -> Result<(), ReportsError> {
        let key = content_key(report.subspace_id, &report.target, &report.reporter);
        let indexed = store.get(&key)?.and_then(|bytes| decode_report_id(&bytes));
        if indexed == Some(report.id) {
            store.delete(&key)?;
        }
        Ok(())
    }

    /// Reports of one subspace, in id order.
    pub fn subspace_reports(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<Vec<Report>, ReportsError> {
        scan(store, &subspace_reports_prefix(subspace_id))
    }

    /// Every stored report, ordered by subspace then id.
    pub fn all_reports(&self, store: &dyn KeyValueStore) -> Result<Vec<Report>, ReportsError> {
        scan(store, KeyPrefix::Report.as_bytes())
    }

    /// Reports against one post, ordered by reporter.
    pub fn post_reports(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        post_id: PostId,
    ) -> Result<Vec<Report>, ReportsError> {
        self.indexed_reports(store, subspace_id, &post_reports_prefix(subspace_id, post_id))
    }

    /// Reports against one user, ordered by reporter.
    pub fn user_reports(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        user: &Address,
    ) -> Result<Vec<Report>, ReportsError> {
        self.indexed_reports(store, subspace_id, &user_reports_prefix(subspace_id, user))
    }

    pub fn target_reports(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        target: &ReportTarget,
    ) -> Result<Vec<Report>, ReportsError> {
        self.indexed_reports(store, subspace_id, &target_reports_prefix(subspace_id, target))
    }

    fn indexed_reports(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        prefix: &[u8],
    ) -> Result<Vec<Report>, ReportsError> {
        let mut reports = Vec::new();
        for (_, value) in store.prefix_scan(prefix)? {
            let report_id = decode_report_id(&value).ok_or_else(|| {
                corruption(format!("malformed content index entry in subspace {subspace_id}"))
            })?;
            let report = self.get_report(store, subspace_id, report_id)?.ok_or_else(|| {
                corruption(format!(
                    "content index points at missing report {report_id} in subspace {subspace_id}"
                ))
            })?;
            reports.push(report);
        }
        Ok(reports)
    }
}
