//! Module parameters: the global standard reason catalog.

use crate::domain::entities::StandardReason;
use crate::domain::errors::ReportsError;
use serde::{Deserialize, Serialize};
use shared_types::ReasonId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub standard_reasons: Vec<StandardReason>,
}

impl Params {
    pub fn new(standard_reasons: Vec<StandardReason>) -> Self {
        Self { standard_reasons }
    }

    /// Find a standard reason by id.
    pub fn standard_reason(&self, id: ReasonId) -> Option<&StandardReason> {
        self.standard_reasons.iter().find(|reason| reason.id == id)
    }

    pub fn validate(&self) -> Result<(), ReportsError> {
        let mut ids = HashSet::with_capacity(self.standard_reasons.len());
        for reason in &self.standard_reasons {
            if !ids.insert(reason.id) {
                return Err(ReportsError::invalid(format!(
                    "duplicated standard reason id: {}",
                    reason.id
                )));
            }
            reason.validate()?;
        }
        Ok(())
    }
}
