use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::contract_dto::{
    CancelContractRequest, ContractQuery, CreateContractRequest, ExtendContractRequest,
    FinishContractRequest, FinishContractResponse, ReassignVehicleRequest,
};
use crate::dto::ApiResponse;
use crate::models::Contract;
use crate::services::{contract_service, listing_service};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct ContractController {
    state: AppState,
}

impl ContractController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, query: ContractQuery) -> Vec<Contract> {
        let store = self.state.store.read().await;
        listing_service::list_contracts(&store, &query)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Contract> {
        let store = self.state.store.read().await;
        listing_service::get_contract(&store, id)
    }

    pub async fn create(&self, request: CreateContractRequest) -> AppResult<ApiResponse<Contract>> {
        request.validate()?;

        let mut store = self.state.store.write().await;
        let contract = contract_service::create_contract(&mut store, request, Utc::now())?;

        let message = format!("Contrato {} generado", contract.contract_number);
        Ok(ApiResponse::success_with_message(contract, message))
    }

    pub async fn extend(
        &self,
        id: Uuid,
        request: ExtendContractRequest,
    ) -> AppResult<ApiResponse<Contract>> {
        request.validate()?;

        let mut store = self.state.store.write().await;
        let contract = contract_service::extend_contract(&mut store, id, request, Utc::now())?;

        Ok(ApiResponse::success_with_message(contract, "Contrato extendido"))
    }

    pub async fn finish(
        &self,
        id: Uuid,
        request: FinishContractRequest,
    ) -> AppResult<ApiResponse<FinishContractResponse>> {
        request.validate()?;

        let mut store = self.state.store.write().await;
        let response = contract_service::finish_contract(&mut store, id, request, Utc::now())?;

        let message = format!("Contrato finalizado. Total a pagar: ${:.2}", response.total_to_pay);
        Ok(ApiResponse::success_with_message(response, message))
    }

    pub async fn cancel(
        &self,
        id: Uuid,
        request: CancelContractRequest,
    ) -> AppResult<ApiResponse<Contract>> {
        let mut store = self.state.store.write().await;
        let contract = contract_service::cancel_contract(&mut store, id, request, Utc::now())?;

        Ok(ApiResponse::success_with_message(contract, "Contrato cancelado"))
    }

    pub async fn reassign(
        &self,
        id: Uuid,
        request: ReassignVehicleRequest,
    ) -> AppResult<ApiResponse<Contract>> {
        let mut store = self.state.store.write().await;
        let contract = contract_service::reassign_vehicle(&mut store, id, request.vehicle_id, Utc::now())?;

        Ok(ApiResponse::success_with_message(contract, "Vehículo reasignado"))
    }
}
