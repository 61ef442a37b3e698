use super::ReportsService;
use crate::config::ReportsConfig;
use crate::domain::entities::{Reason, Report};
use crate::domain::errors::ReportsError;
use crate::domain::params::Params;
use crate::ports::inbound::{
    PageRequest, PageResponse, QueryReasonsRequest, QueryReasonsResponse, QueryReportsRequest,
    QueryReportsResponse, ReportsQueryApi,
};
use shared_types::{KeyValueStore, ReasonId, ReportId, SubspaceId};

/// Cut one page out of `items`.
fn paginate<T>(
    items: Vec<T>,
    page: Option<PageRequest>,
    config: &ReportsConfig,
) -> (Vec<T>, PageResponse) {
    let page = page.unwrap_or_default();
    let limit = config.page_limit(page.limit);
    let total = items.len();

    let selected: Vec<T> = items.into_iter().skip(page.offset).take(limit).collect();
    let end = page.offset.saturating_add(selected.len());
    let next_offset = (end < total).then_some(end);

    (selected, PageResponse { next_offset, total })
}

fn check_subspace_id(subspace_id: SubspaceId) -> Result<(), ReportsError> {
    if subspace_id == 0 {
        return Err(ReportsError::invalid("invalid subspace id: 0"));
    }
    Ok(())
}

impl ReportsQueryApi for ReportsService {
    fn reports(
        &self,
        store: &dyn KeyValueStore,
        request: &QueryReportsRequest,
    ) -> Result<QueryReportsResponse, ReportsError> {
        check_subspace_id(request.subspace_id)?;

        let subspace_id = request.subspace_id;
        let reports = match (&request.target, &request.reporter) {
            (Some(target), Some(reporter)) => self
                .keeper
                .get_report_by_content(store, subspace_id, reporter, target)?
                .into_iter()
                .collect(),
            (Some(target), None) => self.keeper.target_reports(store, subspace_id, target)?,
            (None, reporter) => {
                let mut reports = self.keeper.subspace_reports(store, subspace_id)?;
                if let Some(reporter) = reporter {
                    reports.retain(|report| report.reporter == *reporter);
                }
                reports
            }
        };

        let (reports, pagination) = paginate(reports, request.pagination, &self.config);
        Ok(QueryReportsResponse {
            reports,
            pagination,
        })
    }

    fn report(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        report_id: ReportId,
    ) -> Result<Report, ReportsError> {
        check_subspace_id(subspace_id)?;
        if report_id == 0 {
            return Err(ReportsError::invalid("invalid report id: 0"));
        }
        self.keeper
            .get_report(store, subspace_id, report_id)?
            .ok_or(ReportsError::ReportNotFound {
                subspace_id,
                report_id,
            })
    }

    fn reasons(
        &self,
        store: &dyn KeyValueStore,
        request: &QueryReasonsRequest,
    ) -> Result<QueryReasonsResponse, ReportsError> {
        check_subspace_id(request.subspace_id)?;

        let reasons = self.keeper.subspace_reasons(store, request.subspace_id)?;
        let (reasons, pagination) = paginate(reasons, request.pagination, &self.config);
        Ok(QueryReasonsResponse {
            reasons,
            pagination,
        })
    }

    fn reason(
        &self,
        store: &dyn KeyValueStore,
        subspace_id: SubspaceId,
        reason_id: ReasonId,
    ) -> Result<Reason, ReportsError> {
        check_subspace_id(subspace_id)?;
        if reason_id == 0 {
            return Err(ReportsError::invalid("invalid reason id: 0"));
        }
        self.keeper
            .get_reason(store, subspace_id, reason_id)?
            .ok_or(ReportsError::ReasonNotFound {
                subspace_id,
                reason_id,
            })
    }

    fn params(&self, store: &dyn KeyValueStore) -> Result<Params, ReportsError> {
        self.keeper.get_params(store)
    }
}
