use axum::{
    extract::{Extension, Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::report_controller::ReportController;
use crate::dto::report_dto::{ReportQuery, ReportSummary};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_report_router() -> Router<AppState> {
    Router::new().route("/summary", get(report_summary))
}

async fn report_summary(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ApiResponse<ReportSummary>>, AppError> {
    let report = ReportController::new(state).summary(&user, query).await?;
    Ok(Json(ApiResponse::success(report)))
}
