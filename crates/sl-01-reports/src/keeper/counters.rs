//! Per-subspace identifier allocators.
//!
//! A counter holds the id the next created record will get. Reading an
//! unset counter is an error: the subspace lifecycle hook must have
//! initialized it first.

use super::{corruption, ReportsKeeper};
use crate::domain::errors::{CounterKind, ReportsError};
use crate::domain::keys::{
    decode_reason_id, decode_report_id, encode_reason_id, encode_report_id, next_reason_id_key,
    next_report_id_key,
};
use shared_types::{KeyValueStore, ReasonId, ReportId, SubspaceId};

impl ReportsKeeper {
    pub fn set_next_reason_id(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    ) -> Result<(), ReportsError> {
        store.put(&next_reason_id_key(subspace_id), &encode_reason_id(reason_id))?;
        Ok(())
    }

    pub fn has_next_reason_id(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<bool, ReportsError> {
        Ok(store.exists(&next_reason_id_key(subspace_id))?)
    }

    pub fn get_next_reason_id(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<ReasonId, ReportsError> {
        let bytes = store.get(&next_reason_id_key(subspace_id))?.ok_or(
            ReportsError::UninitializedCounter {
                kind: CounterKind::Reason,
                subspace_id,
            },
        )?;
        decode_reason_id(&bytes)
            .ok_or_else(|| corruption(format!("malformed next reason id for subspace {subspace_id}")))
    }

    pub fn delete_next_reason_id(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), ReportsError> {
        store.delete(&next_reason_id_key(subspace_id))?;
        Ok(())
    }

    pub fn set_next_report_id(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        report_id: ReportId,
    ) -> Result<(), ReportsError> {
        store.put(&next_report_id_key(subspace_id), &encode_report_id(report_id))?;
        Ok(())
    }

    pub fn has_next_report_id(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<bool, ReportsError> {
        Ok(store.exists(&next_report_id_key(subspace_id))?)
    }

    pub fn get_next_report_id(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<ReportId, ReportsError> {
        let bytes = store.get(&next_report_id_key(subspace_id))?.ok_or(
            ReportsError::UninitializedCounter {
                kind: CounterKind::Report,
                subspace_id,
            },
        )?;
        decode_report_id(&bytes)
            .ok_or_else(|| corruption(format!("malformed next report id for subspace {subspace_id}")))
    }

    pub fn delete_next_report_id(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), ReportsError> {
        store.delete(&next_report_id_key(subspace_id))?;
        Ok(())
    }
}
