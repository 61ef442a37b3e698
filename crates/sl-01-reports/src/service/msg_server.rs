use super::ReportsService;
use crate::domain::entities::{Reason, Report, ReportTarget};
use crate::domain::errors::ReportsError;
use crate::domain::msgs::{
    MsgAddReason, MsgAddReasonResponse, MsgCreateReport, MsgCreateReportResponse, MsgDeleteReport,
    MsgRemoveReason, MsgSupportStandardReason, MsgSupportStandardReasonResponse, MsgUpdateParams,
};
use crate::ports::inbound::ReportsMsgApi;
use shared_bus::{EventManager, ModerationEvent};
use shared_types::{KeyValueStore, SubspaceId};
use tracing::info;

fn next_id_overflow(subspace_id: SubspaceId, kind: &str) -> ReportsError {
    ReportsError::invalid(format!("{kind} id space exhausted for subspace {subspace_id}"))
}

impl ReportsMsgApi for ReportsService {
    fn create_report(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgCreateReport,
    ) -> Result<MsgCreateReportResponse, ReportsError> {
        if !self.keeper.has_profile(&msg.reporter) {
            return Err(ReportsError::invalid(format!(
                "{} cannot create a report without having a profile",
                msg.reporter
            )));
        }
        self.require_subspace(msg.subspace_id)?;

        for reason_id in &msg.reasons_ids {
            if !self.keeper.has_reason(store, msg.subspace_id, *reason_id)? {
                return Err(ReportsError::ReasonNotFound {
                    subspace_id: msg.subspace_id,
                    reason_id: *reason_id,
                });
            }
        }

        self.require_permission(
            msg.subspace_id,
            &msg.reporter,
            &self.keeper.permissions().report_content,
            "report content",
        )?;

        if self
            .keeper
            .has_reported(store, msg.subspace_id, &msg.reporter, &msg.target)?
        {
            return Err(ReportsError::AlreadyReported {
                subspace_id: msg.subspace_id,
                reporter: msg.reporter.clone(),
            });
        }

        let report_id = self.keeper.get_next_report_id(store, msg.subspace_id)?;
        let next_report_id = report_id
            .checked_add(1)
            .ok_or_else(|| next_id_overflow(msg.subspace_id, "report"))?;

        let report = Report::new(
            msg.subspace_id,
            report_id,
            msg.reasons_ids.clone(),
            msg.message.clone(),
            msg.target.clone(),
            msg.reporter.clone(),
            self.time_source.now(),
        );
        self.keeper.validate_report(&report)?;

        self.keeper.save_report(store, &report)?;
        self.keeper
            .set_next_report_id(store, msg.subspace_id, next_report_id)?;

        events.emit(ModerationEvent::CreatedReport {
            subspace_id: report.subspace_id,
            report_id,
            reporter: report.reporter.clone(),
            creation_time: report.creation_time,
        });
        events.emit(match &report.target {
            ReportTarget::Post { post_id } => ModerationEvent::ReportedPost {
                subspace_id: report.subspace_id,
                post_id: *post_id,
                reporter: report.reporter.clone(),
            },
            ReportTarget::User { user } => ModerationEvent::ReportedUser {
                subspace_id: report.subspace_id,
                user: user.clone(),
                reporter: report.reporter.clone(),
            },
        });

        info!(
            subspace_id = msg.subspace_id,
            report_id,
            reporter = %msg.reporter,
            "Report created"
        );
        Ok(MsgCreateReportResponse {
            report_id,
            creation_time: report.creation_time,
        })
    }

    fn delete_report(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgDeleteReport,
    ) -> Result<(), ReportsError> {
        self.require_subspace(msg.subspace_id)?;

        let report = self
            .keeper
            .get_report(store, msg.subspace_id, msg.report_id)?
            .ok_or(ReportsError::ReportNotFound {
                subspace_id: msg.subspace_id,
                report_id: msg.report_id,
            })?;

        let permissions = self.keeper.permissions();
        let can_moderate =
            self.keeper
                .has_permission(msg.subspace_id, &msg.signer, &permissions.manage_reports);
        let can_delete_own = report.reporter == msg.signer
            && self.keeper.has_permission(
                msg.subspace_id,
                &msg.signer,
                &permissions.delete_own_reports,
            );
        if !can_moderate && !can_delete_own {
            return Err(ReportsError::PermissionDenied {
                subspace_id: msg.subspace_id,
                user: msg.signer.clone(),
                action: "delete reports",
            });
        }

        self.keeper
            .delete_report(store, msg.subspace_id, msg.report_id)?;

        events.emit(ModerationEvent::DeletedReport {
            subspace_id: msg.subspace_id,
            report_id: msg.report_id,
        });
        Ok(())
    }

    fn support_standard_reason(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgSupportStandardReason,
    ) -> Result<MsgSupportStandardReasonResponse, ReportsError> {
        self.require_subspace(msg.subspace_id)?;

        let standard = self
            .keeper
            .get_standard_reason(store, msg.standard_reason_id)?
            .ok_or(ReportsError::StandardReasonNotFound {
                standard_reason_id: msg.standard_reason_id,
            })?;

        self.require_permission(
            msg.subspace_id,
            &msg.signer,
            &self.keeper.permissions().manage_reasons,
            "manage reasons",
        )?;

        let reason_id = self.keeper.get_next_reason_id(store, msg.subspace_id)?;
        let next_reason_id = reason_id
            .checked_add(1)
            .ok_or_else(|| next_id_overflow(msg.subspace_id, "reason"))?;

        let reason = Reason::new(
            msg.subspace_id,
            reason_id,
            standard.title,
            standard.description,
        );
        reason.validate()?;

        self.keeper.save_reason(store, &reason)?;
        self.keeper
            .set_next_reason_id(store, msg.subspace_id, next_reason_id)?;

        events.emit(ModerationEvent::SupportedStandardReason {
            subspace_id: msg.subspace_id,
            standard_reason_id: msg.standard_reason_id,
            reason_id,
        });
        info!(
            subspace_id = msg.subspace_id,
            standard_reason_id = msg.standard_reason_id,
            reason_id,
            "Standard reason supported"
        );
        Ok(MsgSupportStandardReasonResponse { reason_id })
    }

    fn add_reason(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgAddReason,
    ) -> Result<MsgAddReasonResponse, ReportsError> {
        self.require_subspace(msg.subspace_id)?;
        self.require_permission(
            msg.subspace_id,
            &msg.signer,
            &self.keeper.permissions().manage_reasons,
            "manage reasons",
        )?;

        let reason_id = self.keeper.get_next_reason_id(store, msg.subspace_id)?;
        let next_reason_id = reason_id
            .checked_add(1)
            .ok_or_else(|| next_id_overflow(msg.subspace_id, "reason"))?;

        let reason = Reason::new(
            msg.subspace_id,
            reason_id,
            msg.title.clone(),
            msg.description.clone(),
        );
        reason.validate()?;

        self.keeper.save_reason(store, &reason)?;
        self.keeper
            .set_next_reason_id(store, msg.subspace_id, next_reason_id)?;

        events.emit(ModerationEvent::AddedReason {
            subspace_id: msg.subspace_id,
            reason_id,
        });
        info!(subspace_id = msg.subspace_id, reason_id, "Reason added");
        Ok(MsgAddReasonResponse { reason_id })
    }

    fn remove_reason(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgRemoveReason,
    ) -> Result<(), ReportsError> {
        self.require_subspace(msg.subspace_id)?;

        if !self
            .keeper
            .has_reason(store, msg.subspace_id, msg.reason_id)?
        {
            return Err(ReportsError::ReasonNotFound {
                subspace_id: msg.subspace_id,
                reason_id: msg.reason_id,
            });
        }

        self.require_permission(
            msg.subspace_id,
            &msg.signer,
            &self.keeper.permissions().manage_reasons,
            "manage reasons",
        )?;

        self.keeper
            .delete_reason(store, msg.subspace_id, msg.reason_id)?;

        events.emit(ModerationEvent::RemovedReason {
            subspace_id: msg.subspace_id,
            reason_id: msg.reason_id,
        });
        Ok(())
    }

    fn update_params(
        &self,
        store: &mut dyn KeyValueStore,
        events: &mut EventManager,
        msg: &MsgUpdateParams,
    ) -> Result<(), ReportsError> {
        match &self.config.authority {
            Some(authority) if *authority == msg.authority => {}
            expected => {
                return Err(ReportsError::InvalidAuthority {
                    expected: expected
                        .as_ref()
                        .map_or_else(|| "<unset>".to_string(), ToString::to_string),
                    got: msg.authority.clone(),
                })
            }
        }

        msg.params.validate()?;
        self.keeper.set_params(store, &msg.params)?;

        events.emit(ModerationEvent::UpdatedParams {
            authority: msg.authority.clone(),
        });
        Ok(())
    }
}
