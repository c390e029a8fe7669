use crate::dto::report_dto::{ReportQuery, ReportSummary};
use crate::middleware::AuthenticatedUser;
use crate::services::report_service;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct ReportController {
    state: AppState,
}

impl ReportController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn summary(&self, actor: &AuthenticatedUser, query: ReportQuery) -> AppResult<ReportSummary> {
        actor.require_admin("Solo los administradores pueden ver los reportes")?;

        let store = self.state.store.read().await;
        Ok(report_service::summary(&store, &query))
    }
}
