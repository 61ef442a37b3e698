use super::ReportsKeeper;
use crate::domain::entities::StandardReason;
use crate::domain::errors::ReportsError;
use crate::domain::keys::params_key;
use crate::domain::params::Params;
use shared_types::{KeyValueStore, ReasonId};
use tracing::info;

impl ReportsKeeper {
    /// Current params; the defaults when none were ever stored.
    pub fn get_params(&self, store: &dyn KeyValueStore) -> Result<Params, ReportsError> {
        match store.get(&params_key())? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Params::default()),
        }
    }

    pub fn set_params(
        &self,
        store: &mut dyn KeyValueStore,
        params: &Params,
    ) -> Result<(), ReportsError> {
        store.put(&params_key(), &serde_json::to_vec(params)?)?;
        info!(
            standard_reasons = params.standard_reasons.len(),
            "Params updated"
        );
        Ok(())
    }

    pub fn get_standard_reason(
        &self,
        store: &dyn KeyValueStore,
        standard_reason_id: ReasonId,
    ) -> Result<Option<StandardReason>, ReportsError> {
        Ok(self
            .get_params(store)?
            .standard_reason(standard_reason_id)
            .cloned())
    }
}
