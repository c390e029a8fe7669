use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::rental_controller::RentalController;
use crate::dto::rental_dto::{CreateRentalRequest, RentalQuery};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::Rental;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rentals).post(create_rental))
        .route("/:id", get(get_rental))
        .route("/:id/cancel", post(cancel_rental))
}

async fn list_rentals(
    State(state): State<AppState>,
    Query(query): Query<RentalQuery>,
) -> Json<ApiResponse<Vec<Rental>>> {
    let rentals = RentalController::new(state).list(query).await;
    Json(ApiResponse::success(rentals))
}

async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let rental = RentalController::new(state).get_by_id(id).await?;
    Ok(Json(ApiResponse::success(rental)))
}

async fn create_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateRentalRequest>,
) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let response = RentalController::new(state).create(&user, request).await?;
    Ok(Json(response))
}

async fn cancel_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Rental>>, AppError> {
    let response = RentalController::new(state).cancel(id).await?;
    Ok(Json(response))
}
