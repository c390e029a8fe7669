use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::contract_controller::ContractController;
use crate::dto::contract_dto::{
    CancelContractRequest, ContractQuery, CreateContractRequest, ExtendContractRequest,
    FinishContractRequest, FinishContractResponse, ReassignVehicleRequest,
};
use crate::dto::ApiResponse;
use crate::models::Contract;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_contract_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_contracts).post(create_contract))
        .route("/:id", get(get_contract))
        .route("/:id/extend", post(extend_contract))
        .route("/:id/finish", post(finish_contract))
        .route("/:id/cancel", post(cancel_contract))
        .route("/:id/reassign", post(reassign_vehicle))
}

async fn list_contracts(
    State(state): State<AppState>,
    Query(query): Query<ContractQuery>,
) -> Json<ApiResponse<Vec<Contract>>> {
    let contracts = ContractController::new(state).list(query).await;
    Json(ApiResponse::success(contracts))
}

async fn get_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Contract>>, AppError> {
    let contract = ContractController::new(state).get_by_id(id).await?;
    Ok(Json(ApiResponse::success(contract)))
}

async fn create_contract(
    State(state): State<AppState>,
    Json(request): Json<CreateContractRequest>,
) -> Result<Json<ApiResponse<Contract>>, AppError> {
    let response = ContractController::new(state).create(request).await?;
    Ok(Json(response))
}

async fn extend_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ExtendContractRequest>,
) -> Result<Json<ApiResponse<Contract>>, AppError> {
    let response = ContractController::new(state).extend(id, request).await?;
    Ok(Json(response))
}

async fn finish_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<FinishContractRequest>,
) -> Result<Json<ApiResponse<FinishContractResponse>>, AppError> {
    let response = ContractController::new(state).finish(id, request).await?;
    Ok(Json(response))
}

async fn cancel_contract(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    request: Option<Json<CancelContractRequest>>,
) -> Result<Json<ApiResponse<Contract>>, AppError> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let response = ContractController::new(state).cancel(id, request).await?;
    Ok(Json(response))
}

async fn reassign_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReassignVehicleRequest>,
) -> Result<Json<ApiResponse<Contract>>, AppError> {
    let response = ContractController::new(state).reassign(id, request).await?;
    Ok(Json(response))
}
