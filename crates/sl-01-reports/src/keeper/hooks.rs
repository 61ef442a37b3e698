//! Subscriptions of the reports module to the subspaces and posts
//! lifecycle.

use super::ReportsKeeper;
use crate::domain::entities::ReportTarget;
use crate::domain::errors::ReportsError;
use shared_bus::{HookError, PostsHooks, SubspacesHooks};
use shared_types::{KeyValueStore, PostId, ReportId, SubspaceId};
use std::sync::Arc;
use tracing::{debug, info};

const SUBSCRIBER: &str = "reports";

/// Hook subscriber handed to the subspaces and posts modules.
#[derive(Clone)]
pub struct ReportsKeeperHooks {
    keeper: Arc<ReportsKeeper>,
}

impl ReportsKeeper {
    pub fn hooks(self: &Arc<Self>) -> ReportsKeeperHooks {
        ReportsKeeperHooks {
            keeper: Arc::clone(self),
        }
    }
}

impl ReportsKeeperHooks {
    /// Give a new subspace its counters. Existing counters are kept, so a
    /// subspace update never rewinds id allocation.
    fn init_subspace(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), ReportsError> {
        if !self.keeper.has_next_reason_id(store, subspace_id)? {
            self.keeper.set_next_reason_id(store, subspace_id, 1)?;
        }
        if !self.keeper.has_next_report_id(store, subspace_id)? {
            self.keeper.set_next_report_id(store, subspace_id, 1)?;
        }
        debug!(subspace_id, "Reports counters ready");
        Ok(())
    }

    /// Remove everything the module stores for a subspace.
    fn purge_subspace(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), ReportsError> {
        self.keeper.delete_next_reason_id(store, subspace_id)?;
        self.keeper.delete_next_report_id(store, subspace_id)?;

        for reason in self.keeper.subspace_reasons(store, subspace_id)? {
            self.keeper.delete_reason(store, subspace_id, reason.id)?;
        }
        // Reports citing no stored reason survive the reason cascade
        for report in self.keeper.subspace_reports(store, subspace_id)? {
            self.keeper.delete_report(store, subspace_id, report.id)?;
        }

        info!(subspace_id, "Reports data purged for deleted subspace");
        Ok(())
    }

    fn purge_post(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        post_id: PostId,
    ) -> Result<(), ReportsError> {
        let target = ReportTarget::post(post_id);
        let reports: Vec<ReportId> = self
            .keeper
            .subspace_reports(store, subspace_id)?
            .into_iter()
            .filter(|report| report.target == target)
            .map(|report| report.id)
            .collect();

        for report_id in &reports {
            self.keeper.delete_report(store, subspace_id, *report_id)?;
        }
        debug!(subspace_id, post_id, deleted = reports.len(), "Post reports purged");
        Ok(())
    }
}

fn hook_error(err: ReportsError) -> HookError {
    match err {
        ReportsError::Store(err) => HookError::Store(err),
        ReportsError::Hook(err) => err,
        other => HookError::Subscriber {
            subscriber: SUBSCRIBER,
            message: other.to_string(),
        },
    }
}

impl SubspacesHooks for ReportsKeeperHooks {
    fn after_subspace_saved(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), HookError> {
        self.init_subspace(store, subspace_id).map_err(hook_error)
    }

    fn after_subspace_deleted(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
    ) -> Result<(), HookError> {
        self.purge_subspace(store, subspace_id).map_err(hook_error)
    }
}

impl PostsHooks for ReportsKeeperHooks {
    fn after_post_deleted(
        &self,
        store: &mut dyn KeyValueStore,
        subspace_id: SubspaceId,
        post_id: PostId,
    ) -> Result<(), HookError> {
        self.purge_post(store, subspace_id, post_id).map_err(hook_error)
    }
}
