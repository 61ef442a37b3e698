//! Generic subspace authorization grant.

use crate::config::AuthzConfig;
use crate::domain::errors::AuthzError;
use crate::ports::inbound::ScopedMsg;
use crate::ports::outbound::GasMeter;
use serde::{Deserialize, Serialize};
use shared_types::SubspaceId;
use std::collections::HashSet;
use tracing::debug;

const GAS_DESCRIPTOR: &str = "generic subspace authorization";

/// Grantee may execute `msg_type_url` on the granter's behalf in any of
/// `subspaces_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericSubspaceAuthorization {
    pub subspaces_ids: Vec<SubspaceId>,
    pub msg_type_url: String,
}

/// Outcome of [`GenericSubspaceAuthorization::accept`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptResponse {
    /// Whether the message may be executed.
    pub accept: bool,
    /// Whether the grant should be revoked after execution.
    pub delete: bool,
}

impl AcceptResponse {
    pub const fn accepted() -> Self {
        Self {
            accept: true,
            delete: false,
        }
    }

    pub const fn rejected() -> Self {
        Self {
            accept: false,
            delete: false,
        }
    }
}

impl GenericSubspaceAuthorization {
    pub fn new(subspaces_ids: Vec<SubspaceId>, msg_type_url: impl Into<String>) -> Self {
        Self {
            subspaces_ids,
            msg_type_url: msg_type_url.into(),
        }
    }

    /// Type URL of the message this grant covers.
    pub fn msg_type_url(&self) -> &str {
        &self.msg_type_url
    }

    /// Decide whether `msg` may run under this grant.
    ///
    /// Consumes `config.gas_per_iteration` for each granted id visited.
    pub fn accept(
        &self,
        config: &AuthzConfig,
        meter: &mut dyn GasMeter,
        msg: &dyn ScopedMsg,
    ) -> Result<AcceptResponse, AuthzError> {
        let subspace_id =
            msg.scoped_subspace_id()
                .ok_or_else(|| AuthzError::UnsupportedMessageType {
                    type_url: msg.type_url().to_string(),
                })?;

        if msg.type_url() != self.msg_type_url {
            debug!(
                expected = %self.msg_type_url,
                got = msg.type_url(),
                "Message type not covered by grant"
            );
            return Ok(AcceptResponse::rejected());
        }

        for granted in &self.subspaces_ids {
            meter.consume_gas(config.gas_per_iteration, GAS_DESCRIPTOR)?;
            if *granted == subspace_id {
                debug!(subspace_id, "Subspace authorization accepted");
                return Ok(AcceptResponse::accepted());
            }
        }

        debug!(subspace_id, "Subspace not covered by grant");
        Ok(AcceptResponse::rejected())
    }

    /// Stateless validation of the grant.
    pub fn validate_basic(&self) -> Result<(), AuthzError> {
        if self.subspaces_ids.is_empty() {
            return Err(AuthzError::InvalidAuthorization(
                "subspaces ids cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(self.subspaces_ids.len());
        for id in &self.subspaces_ids {
            if *id == 0 {
                return Err(AuthzError::InvalidAuthorization(
                    "invalid subspace id: 0".to_string(),
                ));
            }
            if !seen.insert(*id) {
                return Err(AuthzError::InvalidAuthorization(format!(
                    "duplicated subspace id: {id}"
                )));
            }
        }

        if self.msg_type_url.trim().is_empty() {
            return Err(AuthzError::InvalidAuthorization(
                "msg type url cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
