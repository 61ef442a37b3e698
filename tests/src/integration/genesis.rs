//! Genesis export/import across ledgers and legacy permission migration.

#[cfg(test)]
mod tests {
    use crate::fixtures::{author, governance, owner, reporter, Ledger};
    use shared_types::Permission;
    use sl_01_reports::{
        GenesisState, MsgUpdateParams, Params, ReportTarget, ReportsError, ReportsMsg,
        StandardReason, SubspaceDataEntry,
    };

    fn import(ledger: &mut Ledger, genesis: &GenesisState) -> Result<(), ReportsError> {
        let keeper = ledger.keeper.clone();
        ledger
            .runner
            .execute(&mut ledger.store, |store, _| keeper.init_genesis(store, genesis))
    }

    /// Two subspaces with reasons, reports and a deleted report leaving a
    /// gap in the ids.
    fn active_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .deliver(ReportsMsg::UpdateParams(MsgUpdateParams {
                authority: governance(),
                params: Params::new(vec![StandardReason::new(1, "Spam", "")]),
            }))
            .unwrap();
        for subspace_id in [1, 2] {
            ledger.create_subspace(subspace_id, owner()).unwrap();
            ledger.create_post(subspace_id, 1, author()).unwrap();
            ledger.add_reason(subspace_id, "Spam").unwrap();
        }
        ledger
            .report(1, vec![1], ReportTarget::post(1), owner())
            .unwrap();
        ledger
            .report(1, vec![1], ReportTarget::user(author()), owner())
            .unwrap();
        ledger
            .report(2, vec![1], ReportTarget::post(1), owner())
            .unwrap();
        ledger.delete_post(1, 1).unwrap();
        ledger
    }

    /// Fresh ledger whose registries know the subspaces and posts of
    /// [`active_ledger`].
    fn empty_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        for subspace_id in [1, 2] {
            ledger.create_subspace(subspace_id, owner()).unwrap();
        }
        ledger.create_post(2, 1, author()).unwrap();
        ledger
    }

    #[test]
    fn test_export_import_reproduces_state() {
        let source = active_ledger();
        let exported = source.keeper.export_genesis(&source.store).unwrap();

        assert_eq!(
            exported.subspaces_data,
            vec![SubspaceDataEntry::new(1, 2, 3), SubspaceDataEntry::new(2, 2, 2)]
        );
        assert_eq!(exported.reasons.len(), 2);
        assert_eq!(exported.reports.len(), 2);
        assert_eq!(exported.params.standard_reasons.len(), 1);

        let json = exported.to_json().unwrap();
        let decoded = GenesisState::from_json(&json).unwrap();

        let mut target = empty_ledger();
        import(&mut target, &decoded).unwrap();

        assert_eq!(target.keeper.export_genesis(&target.store).unwrap(), exported);
        assert_eq!(target.snapshot(), source.snapshot());

        let (message, broken) = target.sweep();
        assert!(!broken, "{message}");

        // Counters carry over, so ids keep growing after import
        assert_eq!(
            target
                .report(1, vec![1], ReportTarget::user(reporter()), owner())
                .unwrap(),
            3
        );
    }

    #[test]
    fn test_invalid_genesis_is_not_imported() {
        let source = active_ledger();
        let mut genesis = source.keeper.export_genesis(&source.store).unwrap();
        genesis.subspaces_data.push(SubspaceDataEntry::new(1, 5, 5));

        let mut target = empty_ledger();
        let before = target.snapshot();

        let err = import(&mut target, &genesis).unwrap_err();
        assert!(matches!(err, ReportsError::InvalidArgument(_)));
        assert_eq!(target.snapshot(), before);
    }

    #[test]
    fn test_legacy_grants_migrate_to_named_permissions() {
        let mut ledger = Ledger::new();
        ledger.create_subspace(1, owner()).unwrap();
        ledger.add_reason(1, "Spam").unwrap();

        let migrated = ledger
            .registry
            .migrate_legacy(Permission::WRITE | Permission::MODERATE_CONTENT);
        let names: Vec<&str> = migrated.iter().map(|name| name.as_str()).collect();
        assert_eq!(names, vec!["WRITE_CONTENT", "MODERATE_CONTENT"]);

        ledger.subspaces.set_user_permissions(1, reporter(), migrated.clone());

        // Legacy content permissions do not include reporting
        let err = ledger
            .report(1, vec![1], ReportTarget::user(author()), reporter())
            .unwrap_err();
        assert!(matches!(err, ReportsError::PermissionDenied { .. }));

        let mut granted = migrated;
        granted.push(ledger.keeper.permissions().report_content.clone());
        ledger.subspaces.set_user_permissions(1, reporter(), granted);
        assert_eq!(
            ledger
                .report(1, vec![1], ReportTarget::user(author()), reporter())
                .unwrap(),
            1
        );
    }
}
