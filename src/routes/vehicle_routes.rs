use axum::{
    extract::{Extension, Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, DateRangeQuery, UpdateVehicleRequest, UpdateVehicleStatusRequest,
    VehicleQuery,
};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::Vehicle;
use crate::services::Availability;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/categories", get(list_categories))
        .route(
            "/:id",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .route("/:id/status", put(update_vehicle_status))
        .route("/:id/availability", get(vehicle_availability))
        .route("/:id/recommendations", get(vehicle_recommendations))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let vehicles = VehicleController::new(state).list(query).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn list_categories(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    let categories = VehicleController::new(state).categories().await;
    Json(ApiResponse::success(categories))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let vehicle = VehicleController::new(state).get_by_id(id).await?;
    Ok(Json(ApiResponse::success(vehicle)))
}

async fn vehicle_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Availability>>, AppError> {
    let availability = VehicleController::new(state).availability(id, range).await?;
    Ok(Json(ApiResponse::success(availability)))
}

async fn vehicle_recommendations(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(range): Query<DateRangeQuery>,
) -> Result<Json<ApiResponse<Vec<Vehicle>>>, AppError> {
    let vehicles = VehicleController::new(state).recommendations(id, range).await?;
    Ok(Json(ApiResponse::success(vehicles)))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let response = VehicleController::new(state).create(&user, request).await?;
    Ok(Json(response))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let response = VehicleController::new(state).update(&user, id, request).await?;
    Ok(Json(response))
}

async fn update_vehicle_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleStatusRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let response = VehicleController::new(state)
        .update_status(&user, id, request)
        .await?;
    Ok(Json(response))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = VehicleController::new(state).delete(&user, id).await?;
    Ok(Json(response))
}
