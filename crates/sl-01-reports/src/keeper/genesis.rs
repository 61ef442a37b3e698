use super::{corruption, ReportsKeeper};
use crate::domain::errors::ReportsError;
use crate::domain::genesis::{GenesisState, SubspaceDataEntry};
use crate::domain::keys::{subspace_from_key, KeyPrefix};
use shared_types::{KeyValueStore, SubspaceId};
use std::collections::BTreeSet;
use tracing::{info, warn};

impl ReportsKeeper {
    /// Import a genesis state: counters, then reasons, then reports, then
    /// params.
    pub fn init_genesis(
        &self,
        store: &mut dyn KeyValueStore,
        genesis: &GenesisState,
    ) -> Result<(), ReportsError> {
        genesis.validate()?;

        for entry in &genesis.subspaces_data {
            self.set_next_reason_id(store, entry.subspace_id, entry.reason_id)?;
            self.set_next_report_id(store, entry.subspace_id, entry.report_id)?;
        }
        for reason in &genesis.reasons {
            self.save_reason(store, reason)?;
        }
        for report in &genesis.reports {
            self.save_report(store, report)?;
        }
        self.set_params(store, &genesis.params)?;

        info!(
            subspaces = genesis.subspaces_data.len(),
            reasons = genesis.reasons.len(),
            reports = genesis.reports.len(),
            "Reports genesis imported"
        );
        Ok(())
    }

    /// Export the whole module state.
    pub fn export_genesis(&self, store: &dyn KeyValueStore) -> Result<GenesisState, ReportsError> {
        let mut subspaces = BTreeSet::new();
        for prefix in [KeyPrefix::NextReasonId, KeyPrefix::NextReportId] {
            for (key, _) in store.prefix_scan(prefix.as_bytes())? {
                let subspace_id = subspace_from_key(&key)
                    .ok_or_else(|| corruption("malformed counter key".to_string()))?;
                subspaces.insert(subspace_id);
            }
        }

        let mut subspaces_data = Vec::with_capacity(subspaces.len());
        for subspace_id in subspaces {
            match self.subspace_data(store, subspace_id)? {
                Some(entry) => subspaces_data.push(entry),
                None => warn!(subspace_id, "Skipping subspace with a single counter"),
            }
        }

        Ok(GenesisState::new(
            subspaces_data,
            self.all_reasons(store)?,
            self.all_reports(store)?,
            self.get_params(store)?,
        ))
    }

    fn subspace_data(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<Option<SubspaceDataEntry>, ReportsError> {
        if !self.has_next_reason_id(store, subspace_id)?
            || !self.has_next_report_id(store, subspace_id)?
        {
            return Ok(None);
        }
        Ok(Some(SubspaceDataEntry::new(
            subspace_id,
            self.get_next_reason_id(store, subspace_id)?,
            self.get_next_report_id(store, subspace_id)?,
        )))
    }
}
