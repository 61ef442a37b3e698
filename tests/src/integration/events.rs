//! Committed transitions reaching bus subscribers.

#[cfg(test)]
mod tests {
    use crate::fixtures::{author, governance, owner, reporter, Ledger, GENESIS_TIME};
    use shared_bus::{EventFilter, EventPublisher, EventTopic, ModerationEvent};
    use sl_01_reports::{
        MsgRemoveReason, MsgUpdateParams, Params, ReportTarget, ReportsConfig, ReportsError,
        ReportsMsg, StandardReason,
    };
    use std::time::Duration;
    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    const WAIT: Duration = Duration::from_secs(1);

    fn ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger.create_subspace(1, owner()).unwrap();
        ledger.create_subspace(2, owner()).unwrap();
        ledger.create_post(1, 1, author()).unwrap();
        ledger
    }

    #[tokio::test]
    async fn test_report_events_arrive_in_order() {
        let mut ledger = ledger();
        let mut reports = ledger
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Reports]).in_subspace(1));

        ledger.add_reason(1, "Spam").unwrap();
        ledger.add_reason(2, "Spam").unwrap();
        ledger
            .report(2, vec![1], ReportTarget::user(author()), owner())
            .unwrap();
        ledger
            .report(1, vec![1], ReportTarget::post(1), owner())
            .unwrap();

        let created = timeout(WAIT, reports.recv()).await.unwrap().unwrap();
        assert_eq!(
            created,
            ModerationEvent::CreatedReport {
                subspace_id: 1,
                report_id: 1,
                reporter: owner(),
                creation_time: GENESIS_TIME,
            }
        );
        let reported = timeout(WAIT, reports.recv()).await.unwrap().unwrap();
        assert_eq!(
            reported,
            ModerationEvent::ReportedPost {
                subspace_id: 1,
                post_id: 1,
                reporter: owner(),
            }
        );

        // Reasons and other subspaces are filtered out
        assert_eq!(reports.try_recv().unwrap(), None);
    }

    #[tokio::test]
    async fn test_rejected_transition_publishes_nothing() {
        let mut ledger = ledger();
        ledger.add_reason(1, "Spam").unwrap();
        let mut all = ledger.bus.subscribe(EventFilter::all());
        let published = ledger.bus.events_published();

        let err = ledger
            .report(1, vec![1], ReportTarget::post(1), reporter())
            .unwrap_err();
        assert!(matches!(err, ReportsError::PermissionDenied { .. }));

        let err = ledger
            .report(1, vec![3], ReportTarget::post(1), owner())
            .unwrap_err();
        assert!(matches!(err, ReportsError::ReasonNotFound { .. }));

        assert_eq!(ledger.bus.events_published(), published);
        assert_eq!(all.try_recv().unwrap(), None);
    }

    #[tokio::test]
    async fn test_reason_stream_follows_cascades() {
        let mut ledger = ledger();
        let mut stream = ledger
            .bus
            .event_stream(EventFilter::topics(vec![EventTopic::Reasons]).in_subspace(1));

        let spam = ledger.add_reason(1, "Spam").unwrap();
        ledger
            .report(1, vec![spam], ReportTarget::post(1), owner())
            .unwrap();
        ledger
            .deliver(ReportsMsg::RemoveReason(MsgRemoveReason {
                subspace_id: 1,
                reason_id: spam,
                signer: owner(),
            }))
            .unwrap();

        let added = timeout(WAIT, stream.next()).await.unwrap().unwrap();
        assert_eq!(
            added,
            ModerationEvent::AddedReason {
                subspace_id: 1,
                reason_id: spam,
            }
        );
        let removed = timeout(WAIT, stream.next()).await.unwrap().unwrap();
        assert_eq!(
            removed,
            ModerationEvent::RemovedReason {
                subspace_id: 1,
                reason_id: spam,
            }
        );
    }

    #[tokio::test]
    async fn test_params_update_reaches_module_wide_subscribers() {
        let mut ledger = ledger();
        let mut params = ledger
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Params]));

        ledger
            .deliver(ReportsMsg::UpdateParams(MsgUpdateParams {
                authority: governance(),
                params: Params::new(vec![StandardReason::new(1, "Spam", "")]),
            }))
            .unwrap();

        let event = timeout(WAIT, params.recv()).await.unwrap().unwrap();
        assert_eq!(
            event,
            ModerationEvent::UpdatedParams {
                authority: governance(),
            }
        );
    }

    #[tokio::test]
    async fn test_params_update_without_authority_is_refused() {
        let mut ledger = Ledger::with_config(ReportsConfig::default());
        let mut params = ledger.bus.subscribe(EventFilter::all());

        let err = ledger
            .deliver(ReportsMsg::UpdateParams(MsgUpdateParams {
                authority: governance(),
                params: Params::default(),
            }))
            .unwrap_err();
        assert!(matches!(err, ReportsError::InvalidAuthority { .. }));
        assert_eq!(params.try_recv().unwrap(), None);
    }
}
