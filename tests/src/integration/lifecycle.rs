//! Subspace and post lifecycle cascades into the reports module.

#[cfg(test)]
mod tests {
    use crate::fixtures::{author, owner, reporter, Ledger};
    use shared_bus::{HookError, PostsHooks, SubspacesHooks};
    use shared_types::{KeyValueStore, PostId, SubspaceId};
    use sl_01_reports::{PostsRegistry, ReportTarget, ReportsError, SubspacesRegistry};

    /// Subspaces 1 and 2 with one reason, two posts and three reports each.
    fn populated() -> Ledger {
        let mut ledger = Ledger::new();
        for subspace_id in [1, 2] {
            ledger.create_subspace(subspace_id, owner()).unwrap();
            ledger.create_post(subspace_id, 1, author()).unwrap();
            ledger.create_post(subspace_id, 2, author()).unwrap();
            ledger.add_reason(subspace_id, "Spam").unwrap();
            ledger
                .report(subspace_id, vec![1], ReportTarget::post(1), owner())
                .unwrap();
            ledger
                .report(subspace_id, vec![1], ReportTarget::post(2), owner())
                .unwrap();
            ledger
                .report(subspace_id, vec![1], ReportTarget::user(author()), owner())
                .unwrap();
        }
        ledger
    }

    /// Subscriber refusing either saves or deletions.
    struct Failing {
        saves: bool,
    }

    impl Failing {
        fn refuse(&self, refused: bool) -> Result<(), HookError> {
            if !refused {
                return Ok(());
            }
            Err(HookError::Subscriber {
                subscriber: "audit",
                message: "refusing change".to_string(),
            })
        }
    }

    impl SubspacesHooks for Failing {
        fn after_subspace_saved(
            &self,
            _store: &mut dyn KeyValueStore,
            _subspace_id: SubspaceId,
        ) -> Result<(), HookError> {
            self.refuse(self.saves)
        }

        fn after_subspace_deleted(
            &self,
            _store: &mut dyn KeyValueStore,
            _subspace_id: SubspaceId,
        ) -> Result<(), HookError> {
            self.refuse(!self.saves)
        }
    }

    impl PostsHooks for Failing {
        fn after_post_saved(
            &self,
            _store: &mut dyn KeyValueStore,
            _subspace_id: SubspaceId,
            _post_id: PostId,
        ) -> Result<(), HookError> {
            self.refuse(self.saves)
        }

        fn after_post_deleted(
            &self,
            _store: &mut dyn KeyValueStore,
            _subspace_id: SubspaceId,
            _post_id: PostId,
        ) -> Result<(), HookError> {
            self.refuse(!self.saves)
        }
    }

    // =========================================================================
    // SUBSPACES
    // =========================================================================

    #[test]
    fn test_subspace_creation_initializes_counters() {
        let mut ledger = Ledger::new();
        ledger.create_subspace(5, owner()).unwrap();

        assert_eq!(ledger.keeper.get_next_reason_id(&ledger.store, 5).unwrap(), 1);
        assert_eq!(ledger.keeper.get_next_report_id(&ledger.store, 5).unwrap(), 1);
    }

    #[test]
    fn test_subspace_update_keeps_counters() {
        let mut ledger = Ledger::new();
        ledger.create_subspace(1, owner()).unwrap();
        ledger.add_reason(1, "Spam").unwrap();

        // Saving an existing subspace again must not rewind the counters
        ledger.create_subspace(1, owner()).unwrap();
        assert_eq!(ledger.add_reason(1, "Scam").unwrap(), 2);
    }

    #[test]
    fn test_subspace_deletion_purges_only_that_subspace() {
        let mut ledger = populated();

        ledger.delete_subspace(1).unwrap();

        assert!(ledger.keeper.subspace_reasons(&ledger.store, 1).unwrap().is_empty());
        assert!(ledger.keeper.subspace_reports(&ledger.store, 1).unwrap().is_empty());
        assert!(!ledger.keeper.has_next_reason_id(&ledger.store, 1).unwrap());
        assert!(!ledger.keeper.has_next_report_id(&ledger.store, 1).unwrap());
        assert!(ledger
            .keeper
            .get_report_by_content(&ledger.store, 1, &owner(), &ReportTarget::post(1))
            .unwrap()
            .is_none());

        assert_eq!(ledger.keeper.subspace_reasons(&ledger.store, 2).unwrap().len(), 1);
        assert_eq!(ledger.keeper.subspace_reports(&ledger.store, 2).unwrap().len(), 3);

        let err = ledger.add_reason(1, "Spam").unwrap_err();
        assert!(matches!(err, ReportsError::SubspaceNotFound { subspace_id: 1 }));

        let (message, broken) = ledger.sweep();
        assert!(!broken, "{message}");
    }

    #[test]
    fn test_failing_subscriber_aborts_subspace_deletion() {
        let mut ledger = populated();
        ledger
            .subspaces
            .register_hooks(Box::new(Failing { saves: false }));
        let before = ledger.snapshot();

        let err = ledger.delete_subspace(1).unwrap_err();
        assert!(matches!(err, ReportsError::Hook(HookError::Subscriber { .. })));

        // The reports purge ran inside the aborted transition only
        assert_eq!(ledger.snapshot(), before);
        assert!(ledger.subspaces.has_subspace(1));
        assert_eq!(ledger.keeper.subspace_reports(&ledger.store, 1).unwrap().len(), 3);
    }

    #[test]
    fn test_failing_subscriber_aborts_subspace_creation() {
        let mut ledger = populated();
        ledger
            .subspaces
            .register_hooks(Box::new(Failing { saves: true }));
        let before = ledger.snapshot();

        let err = ledger.create_subspace(9, owner()).unwrap_err();
        assert!(matches!(err, ReportsError::Hook(HookError::Subscriber { .. })));

        // Neither the counters nor the registry entry survive the abort
        assert_eq!(ledger.snapshot(), before);
        assert!(!ledger.subspaces.has_subspace(9));
        assert!(!ledger.keeper.has_next_reason_id(&ledger.store, 9).unwrap());

        // An aborted re-save keeps the existing owner
        let err = ledger.create_subspace(1, reporter()).unwrap_err();
        assert!(matches!(err, ReportsError::Hook(_)));
        assert!(ledger.add_reason(1, "Scam").is_ok());

        let (message, broken) = ledger.sweep();
        assert!(!broken, "{message}");
    }

    // =========================================================================
    // POSTS
    // =========================================================================

    #[test]
    fn test_post_deletion_purges_reports_on_that_post() {
        let mut ledger = populated();
        ledger.grant(1, reporter(), &["report_content"]);
        ledger
            .report(1, vec![1], ReportTarget::post(1), reporter())
            .unwrap();

        ledger.delete_post(1, 1).unwrap();

        let remaining: Vec<ReportTarget> = ledger
            .keeper
            .subspace_reports(&ledger.store, 1)
            .unwrap()
            .into_iter()
            .map(|report| report.target)
            .collect();
        assert_eq!(
            remaining,
            vec![ReportTarget::post(2), ReportTarget::user(author())]
        );
        assert!(ledger
            .keeper
            .post_reports(&ledger.store, 1, 1)
            .unwrap()
            .is_empty());

        // Same post id in another subspace is a different post
        assert_eq!(ledger.keeper.post_reports(&ledger.store, 2, 1).unwrap().len(), 1);

        let (message, broken) = ledger.sweep();
        assert!(!broken, "{message}");
    }

    #[test]
    fn test_failing_subscriber_aborts_post_creation() {
        let mut ledger = populated();
        ledger.posts.register_hooks(Box::new(Failing { saves: true }));

        let err = ledger.create_post(1, 3, author()).unwrap_err();
        assert!(matches!(err, ReportsError::Hook(HookError::Subscriber { .. })));
        assert!(!ledger.posts.has_post(1, 3));

        // Reporting the post that never got saved is refused
        let err = ledger
            .report(1, vec![1], ReportTarget::post(3), owner())
            .unwrap_err();
        assert!(matches!(err, ReportsError::InvalidArgument(_)));

        // An aborted edit keeps the original author
        assert!(ledger.create_post(1, 1, reporter()).is_err());
        assert_eq!(ledger.posts.get_post(1, 1).map(|post| post.owner), Some(author()));
    }

    #[test]
    fn test_deleting_unknown_post_is_a_no_op() {
        let mut ledger = populated();
        let before = ledger.snapshot();

        ledger.delete_post(1, 42).unwrap();
        assert_eq!(ledger.snapshot(), before);
    }
}
