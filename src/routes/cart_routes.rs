use axum::{
    extract::{Extension, Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::cart_controller::CartController;
use crate::dto::cart_dto::{AddToCartRequest, CartSummary, CheckoutRequest, CheckoutResponse};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_cart_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route("/checkout", post(checkout))
        .route("/:vehicle_id", delete(remove_from_cart))
}

async fn get_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Json<ApiResponse<CartSummary>> {
    let cart = CartController::new(state).get(&user).await;
    Json(ApiResponse::success(cart))
}

async fn add_to_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<ApiResponse<CartSummary>>, AppError> {
    let response = CartController::new(state).add(&user, request).await?;
    Ok(Json(response))
}

async fn remove_from_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CartSummary>>, AppError> {
    let response = CartController::new(state).remove(&user, vehicle_id).await?;
    Ok(Json(response))
}

async fn clear_cart(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let response = CartController::new(state).clear(&user).await?;
    Ok(Json(response))
}

async fn checkout(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<CheckoutResponse>>, AppError> {
    let response = CartController::new(state).checkout(&user, request).await?;
    Ok(Json(response))
}
