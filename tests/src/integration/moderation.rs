//! Reason and report flows delivered through the transition runner.

#[cfg(test)]
mod tests {
    use crate::fixtures::{author, governance, moderator, owner, reporter, Ledger};
    use shared_types::Address;
    use sl_01_reports::{
        MsgDeleteReport, MsgRemoveReason, MsgSupportStandardReason, MsgUpdateParams, Params,
        ReportTarget, ReportsError, ReportsMsg, ReportsResponse, StandardReason,
    };

    /// Subspace 1 owned by `owner`, post 1 written by `author`, `reporter`
    /// allowed to report and to delete their own reports.
    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.create_subspace(1, owner()).unwrap();
        ledger.create_post(1, 1, author()).unwrap();
        ledger.grant(1, reporter(), &["report_content", "delete_own_reports"]);
        ledger
    }

    fn delete_report(report_id: u64, signer: Address) -> ReportsMsg {
        ReportsMsg::DeleteReport(MsgDeleteReport {
            subspace_id: 1,
            report_id,
            signer,
        })
    }

    // =========================================================================
    // REASONS
    // =========================================================================

    #[test]
    fn test_report_on_removed_reason_disappears() {
        let mut ledger = ledger();
        ledger.create_post(1, 7, author()).unwrap();
        assert_eq!(ledger.keeper.get_next_reason_id(&ledger.store, 1).unwrap(), 1);

        let spam = ledger.add_reason(1, "Spam").unwrap();
        assert_eq!(spam, 1);
        assert_eq!(ledger.keeper.get_next_reason_id(&ledger.store, 1).unwrap(), 2);

        let report_id = ledger
            .report(1, vec![spam], ReportTarget::post(7), reporter())
            .unwrap();
        assert_eq!(report_id, 1);

        ledger
            .deliver(ReportsMsg::RemoveReason(MsgRemoveReason {
                subspace_id: 1,
                reason_id: spam,
                signer: owner(),
            }))
            .unwrap();
        assert!(!ledger.keeper.has_report(&ledger.store, 1, report_id).unwrap());

        let (message, broken) = ledger.sweep();
        assert!(!broken, "{message}");
    }

    #[test]
    fn test_remove_reason_cascades_and_sweep_stays_clean() {
        let mut ledger = ledger();
        let spam = ledger.add_reason(1, "Spam").unwrap();
        let scam = ledger.add_reason(1, "Scam").unwrap();
        assert_eq!((spam, scam), (1, 2));

        let on_post = ledger
            .report(1, vec![spam], ReportTarget::post(1), reporter())
            .unwrap();
        let on_user = ledger
            .report(1, vec![spam, scam], ReportTarget::user(author()), reporter())
            .unwrap();
        let survivor = ledger
            .report(1, vec![scam], ReportTarget::post(1), owner())
            .unwrap();
        assert_eq!((on_post, on_user, survivor), (1, 2, 3));

        ledger
            .deliver(ReportsMsg::RemoveReason(MsgRemoveReason {
                subspace_id: 1,
                reason_id: spam,
                signer: owner(),
            }))
            .unwrap();

        let reports = ledger.keeper.subspace_reports(&ledger.store, 1).unwrap();
        let ids: Vec<u64> = reports.iter().map(|report| report.id).collect();
        assert_eq!(ids, vec![survivor]);
        assert!(!ledger.keeper.has_reason(&ledger.store, 1, spam).unwrap());

        // The reporter may report the post again once the old report is gone
        let again = ledger
            .report(1, vec![scam], ReportTarget::post(1), reporter())
            .unwrap();
        assert_eq!(again, 4);

        let (message, broken) = ledger.sweep();
        assert!(!broken, "{message}");
    }

    #[test]
    fn test_support_standard_reason_continues_local_counter() {
        let mut ledger = ledger();
        ledger
            .deliver(ReportsMsg::UpdateParams(MsgUpdateParams {
                authority: governance(),
                params: Params::new(vec![
                    StandardReason::new(1, "Spam", "Unsolicited content"),
                    StandardReason::new(2, "Harassment", ""),
                ]),
            }))
            .unwrap();

        ledger.add_reason(1, "Local one").unwrap();
        ledger.add_reason(1, "Local two").unwrap();
        assert_eq!(ledger.keeper.get_next_reason_id(&ledger.store, 1).unwrap(), 3);

        let response = ledger
            .deliver(ReportsMsg::SupportStandardReason(MsgSupportStandardReason {
                subspace_id: 1,
                standard_reason_id: 1,
                signer: owner(),
            }))
            .unwrap();
        let ReportsResponse::SupportStandardReason(response) = response else {
            panic!("unexpected response {response:?}");
        };
        assert_eq!(response.reason_id, 3);
        assert_eq!(ledger.keeper.get_next_reason_id(&ledger.store, 1).unwrap(), 4);

        let reason = ledger.keeper.get_reason(&ledger.store, 1, 3).unwrap().unwrap();
        assert_eq!(reason.title, "Spam");
        assert_eq!(reason.description, "Unsolicited content");
    }

    #[test]
    fn test_subspaces_keep_separate_catalogs() {
        let mut ledger = ledger();
        ledger.create_subspace(2, owner()).unwrap();

        assert_eq!(ledger.add_reason(1, "Spam").unwrap(), 1);
        assert_eq!(ledger.add_reason(2, "Spam").unwrap(), 1);
        assert_eq!(ledger.add_reason(2, "Scam").unwrap(), 2);

        // Reason 2 exists in subspace 2 only
        let err = ledger
            .report(1, vec![2], ReportTarget::user(author()), owner())
            .unwrap_err();
        assert!(matches!(
            err,
            ReportsError::ReasonNotFound {
                subspace_id: 1,
                reason_id: 2
            }
        ));
    }

    // =========================================================================
    // REPORTS
    // =========================================================================

    #[test]
    fn test_rejected_reports_leave_store_untouched() {
        let mut ledger = ledger();
        ledger.add_reason(1, "Spam").unwrap();
        ledger
            .report(1, vec![1], ReportTarget::post(1), reporter())
            .unwrap();
        let before = ledger.snapshot();

        let err = ledger
            .report(1, vec![1, 9], ReportTarget::user(author()), reporter())
            .unwrap_err();
        assert!(matches!(err, ReportsError::ReasonNotFound { reason_id: 9, .. }));

        let err = ledger
            .report(1, vec![1], ReportTarget::post(1), reporter())
            .unwrap_err();
        assert!(matches!(err, ReportsError::AlreadyReported { .. }));

        let err = ledger
            .report(1, vec![1], ReportTarget::post(1), moderator())
            .unwrap_err();
        assert!(matches!(err, ReportsError::PermissionDenied { .. }));

        let err = ledger
            .report(1, vec![1], ReportTarget::post(7), owner())
            .unwrap_err();
        assert!(matches!(err, ReportsError::InvalidArgument(_)));

        assert_eq!(ledger.snapshot(), before);
        assert_eq!(ledger.keeper.get_next_report_id(&ledger.store, 1).unwrap(), 2);
    }

    #[test]
    fn test_reporter_without_profile_is_refused() {
        let mut ledger = ledger();
        ledger.add_reason(1, "Spam").unwrap();
        ledger.profiles.delete_profile(&reporter());
        let before = ledger.snapshot();

        // Permission to report is not enough without a profile
        let err = ledger
            .report(1, vec![1], ReportTarget::post(1), reporter())
            .unwrap_err();
        assert!(matches!(err, ReportsError::InvalidArgument(_)));
        assert_eq!(ledger.snapshot(), before);

        // Profiles only gate new reports, not reasons or deletions
        ledger.profiles.delete_profile(&owner());
        assert_eq!(ledger.add_reason(1, "Scam").unwrap(), 2);
    }

    #[test]
    fn test_blocked_reporter_cannot_report() {
        let mut ledger = ledger();
        ledger.add_reason(1, "Spam").unwrap();
        ledger.relationships.block_user(author(), reporter(), 1);

        // Blocked by the post author
        let err = ledger
            .report(1, vec![1], ReportTarget::post(1), reporter())
            .unwrap_err();
        assert!(matches!(err, ReportsError::Blocked { .. }));

        // Blocked by the reported user
        let err = ledger
            .report(1, vec![1], ReportTarget::user(author()), reporter())
            .unwrap_err();
        assert!(matches!(err, ReportsError::Blocked { .. }));

        // A block in another subspace does not count
        ledger.relationships.unblock_user(&author(), &reporter(), 1);
        ledger.relationships.block_user(author(), reporter(), 2);
        assert!(ledger
            .report(1, vec![1], ReportTarget::post(1), reporter())
            .is_ok());
    }

    #[test]
    fn test_delete_report_permissions() {
        let mut ledger = ledger();
        ledger.grant(1, moderator(), &["manage_reports"]);
        ledger.add_reason(1, "Spam").unwrap();

        let by_reporter = ledger
            .report(1, vec![1], ReportTarget::post(1), reporter())
            .unwrap();
        let by_owner = ledger
            .report(1, vec![1], ReportTarget::user(author()), owner())
            .unwrap();

        // Own-report permission does not reach other reporters' reports
        let err = ledger.deliver(delete_report(by_owner, reporter())).unwrap_err();
        assert!(matches!(err, ReportsError::PermissionDenied { .. }));

        ledger.deliver(delete_report(by_reporter, reporter())).unwrap();
        ledger.deliver(delete_report(by_owner, moderator())).unwrap();
        assert!(ledger.keeper.subspace_reports(&ledger.store, 1).unwrap().is_empty());

        let err = ledger.deliver(delete_report(by_owner, moderator())).unwrap_err();
        assert!(matches!(err, ReportsError::ReportNotFound { .. }));

        // Ids are never reused after deletion
        let next = ledger
            .report(1, vec![1], ReportTarget::post(1), reporter())
            .unwrap();
        assert_eq!(next, 3);

        let (message, broken) = ledger.sweep();
        assert!(!broken, "{message}");
    }
}
