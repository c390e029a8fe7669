use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{
    CreateVehicleRequest, DateRangeQuery, UpdateVehicleRequest, UpdateVehicleStatusRequest,
    VehicleQuery,
};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::Vehicle;
use crate::services::availability_service::{
    check_vehicle_availability, recommended_vehicles, Availability,
};
use crate::services::vehicle_service;
use crate::state::AppState;
use crate::utils::errors::{bad_request_error, not_found_error, AppResult};
use crate::utils::validation::validate_date_range;

const ADMIN_ONLY: &str = "Solo los administradores pueden modificar la flota";

pub struct VehicleController {
    state: AppState,
}

impl VehicleController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, query: VehicleQuery) -> AppResult<Vec<Vehicle>> {
        let store = self.state.store.read().await;
        vehicle_service::list_vehicles(&store, &query)
    }

    pub async fn categories(&self) -> Vec<String> {
        let store = self.state.store.read().await;
        vehicle_service::categories(&store)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        let store = self.state.store.read().await;
        store
            .vehicle(id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehículo", id))
    }

    pub async fn availability(&self, id: Uuid, range: DateRangeQuery) -> AppResult<Availability> {
        let store = self.state.store.read().await;
        if store.vehicle(id).is_none() {
            return Err(not_found_error("Vehículo", id));
        }
        Ok(check_vehicle_availability(&store, id, range.start_date, range.end_date))
    }

    pub async fn recommendations(&self, id: Uuid, range: DateRangeQuery) -> AppResult<Vec<Vehicle>> {
        validate_date_range(range.start_date, range.end_date)
            .map_err(|_| bad_request_error("La fecha de fin debe ser posterior a la fecha de inicio"))?;

        let store = self.state.store.read().await;
        Ok(recommended_vehicles(&store, id, range.start_date, range.end_date))
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        actor.require_admin(ADMIN_ONLY)?;
        request.validate()?;

        let mut store = self.state.store.write().await;
        let vehicle = vehicle_service::create_vehicle(&mut store, request)?;

        Ok(ApiResponse::success_with_message(vehicle, "Vehículo creado exitosamente"))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        actor.require_admin(ADMIN_ONLY)?;
        request.validate()?;

        let mut store = self.state.store.write().await;
        let vehicle = vehicle_service::update_vehicle(&mut store, id, request)?;

        Ok(ApiResponse::success_with_message(vehicle, "Vehículo actualizado exitosamente"))
    }

    pub async fn update_status(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateVehicleStatusRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        actor.require_admin(ADMIN_ONLY)?;

        let mut store = self.state.store.write().await;
        let vehicle = vehicle_service::update_vehicle_status(&mut store, id, request.status)?;

        Ok(ApiResponse::success_with_message(
            vehicle.clone(),
            format!("Estado actualizado a {}", vehicle.status),
        ))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<ApiResponse<()>> {
        actor.require_admin(ADMIN_ONLY)?;

        let mut store = self.state.store.write().await;
        vehicle_service::delete_vehicle(&mut store, id)?;

        Ok(ApiResponse::message_only("Vehículo eliminado exitosamente"))
    }
}
