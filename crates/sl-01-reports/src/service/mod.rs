//! # Reports Service
//!
//! Message and query handlers of the reports module.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `ReportsMsgApi` on top of the keeper
//! 2. Implements `ReportsQueryApi` with bounded pagination
//! 3. Checks existence and permissions before any mutation
//! 4. Collects events in the caller's `EventManager`; `TxRunner` publishes
//!    them once the transition has been committed

mod msg_server;
mod query;
mod runner;

pub use runner::TxRunner;

use crate::config::ReportsConfig;
use crate::domain::errors::ReportsError;
use crate::domain::msgs::{ReportsMsg, ReportsResponse};
use crate::keeper::ReportsKeeper;
use crate::ports::inbound::ReportsMsgApi;
use crate::ports::outbound::TimeSource;
use shared_bus::EventManager;
use shared_types::{Address, KeyValueStore, PermissionName, SubspaceId};
use std::sync::Arc;

pub struct ReportsService {
    keeper: Arc<ReportsKeeper>,
    config: ReportsConfig,
    time_source: Arc<dyn TimeSource>,
}

impl ReportsService {
    pub fn new(
        keeper: Arc<ReportsKeeper>,
        config: ReportsConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            keeper,
            config: config.normalized(),
            time_source,
        }
    }

    pub fn keeper(&self) -> &Arc<ReportsKeeper> {
        &self.keeper
    }

    pub fn config(&self) -> &ReportsConfig {
        &self.config
    }

    /// Dispatch a message to its handler.
    pub fn handle(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &ReportsMsg,
    ) -> Result<ReportsResponse, ReportsError> {
        match msg {
            ReportsMsg::CreateReport(msg) => self
                .create_report(store, events, msg)
                .map(ReportsResponse::CreateReport),
            ReportsMsg::DeleteReport(msg) => self
                .delete_report(store, events, msg)
                .map(|()| ReportsResponse::DeleteReport),
            ReportsMsg::SupportStandardReason(msg) => self
                .support_standard_reason(store, events, msg)
                .map(ReportsResponse::SupportStandardReason),
            ReportsMsg::AddReason(msg) => self
                .add_reason(store, events, msg)
                .map(ReportsResponse::AddReason),
            ReportsMsg::RemoveReason(msg) => self
                .remove_reason(store, events, msg)
                .map(|()| ReportsResponse::RemoveReason),
            ReportsMsg::UpdateParams(msg) => self
                .update_params(store, events, msg)
                .map(|()| ReportsResponse::UpdateParams),
        }
    }

    fn require_subspace(&self, subspace_id: SubspaceId) -> Result<(), ReportsError> {
        if !self.keeper.has_subspace(subspace_id) {
            return Err(ReportsError::SubspaceNotFound { subspace_id });
        }
        Ok(())
    }

    fn require_permission(
        &self,
        subspace_id: SubspaceId,
        user: &Address,
        permission: &PermissionName,
        action: &'static str,
    ) -> Result<(), ReportsError> {
        if !self.keeper.has_permission(subspace_id, user, permission) {
            return Err(ReportsError::PermissionDenied {
                subspace_id,
                user: user.clone(),
                action,
            });
        }
        Ok(())
    }
}
