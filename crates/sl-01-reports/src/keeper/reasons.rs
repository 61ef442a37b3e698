use super::{decode, encode, scan, ReportsKeeper};
use crate::domain::entities::Reason;
use crate::domain::errors::ReportsError;
use crate::domain::keys::{reason_key, subspace_reasons_prefix, KeyPrefix};
use shared_bus::ReportsHooks;
use shared_types::{KeyValueStore, ReasonId, ReportId, SubspaceId};
use tracing::{debug, info};

impl ReportsKeeper {
    /// Store a reason, overwriting any record with the same id.
    pub fn save_reason(
        &self,
        store: &mut dyn KeyValueStore,
        reason: &Reason,
    ) -> Result<(), ReportsError> {
        store.put(&reason_key(reason.subspace_id, reason.id), &encode(reason)?)?;
        debug!(
            subspace_id = reason.subspace_id,
            reason_id = reason.id,
            "Reason saved"
        );
        self.hooks
            .after_reason_saved(store, reason.subspace_id, reason.id)?;
        Ok(())
    }

    pub fn has_reason(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    ) -> Result<bool, ReportsError> {
        Ok(store.exists(&reason_key(subspace_id, reason_id))?)
    }

    pub fn get_reason(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    ) -> Result<Option<Reason>, ReportsError> {
        store
            .get(&reason_key(subspace_id, reason_id))?
            .map(|bytes| decode(&bytes))
            .transpose()
    }

    /// Delete a reason together with every report citing it.
    ///
    /// Deleting a missing reason is a no-op.
    pub fn delete_reason(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    ) -> Result<(), ReportsError> {
        if !self.has_reason(store, subspace_id, reason_id)? {
            return Ok(());
        }

        let citing: Vec<ReportId> = self
            .subspace_reports(store, subspace_id)?
            .into_iter()
            .filter(|report| report.reasons_ids.contains(&reason_id))
            .map(|report| report.id)
            .collect();
        for report_id in &citing {
            self.delete_report(store, subspace_id, *report_id)?;
        }

        store.delete(&reason_key(subspace_id, reason_id))?;
        info!(
            subspace_id,
            reason_id,
            cascaded_reports = citing.len(),
            "Reason deleted"
        );
        self.hooks
            .after_reason_deleted(store, subspace_id, reason_id)?;
        Ok(())
    }

    /// Reasons of one subspace, in id order.
    pub fn subspace_reasons(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<Vec<Reason>, ReportsError> {
        scan(store, &subspace_reasons_prefix(subspace_id))
    }

    /// Every stored reason, ordered by subspace then id.
    pub fn all_reasons(&self, store: &dyn KeyValueStore) -> Result<Vec<Reason>, ReportsError> {
        scan(store, KeyPrefix::Reason.as_bytes())
    }
}
