use chrono::Utc;
use tokio::time::sleep;
use uuid::Uuid;

use crate::dto::cart_dto::{AddToCartRequest, CartSummary, CheckoutRequest, CheckoutResponse};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::services::cart_service;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct CartController {
    state: AppState,
}

impl CartController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn get(&self, actor: &AuthenticatedUser) -> CartSummary {
        let store = self.state.store.read().await;
        cart_service::summary(&store, actor.user_id)
    }

    pub async fn add(
        &self,
        actor: &AuthenticatedUser,
        request: AddToCartRequest,
    ) -> AppResult<ApiResponse<CartSummary>> {
        let mut store = self.state.store.write().await;
        let cart = cart_service::add_item(
            &mut store,
            actor.user_id,
            request.vehicle_id,
            request.start_date,
            request.end_date,
        )?;

        Ok(ApiResponse::success_with_message(cart, "Vehículo agregado al carrito"))
    }

    pub async fn remove(
        &self,
        actor: &AuthenticatedUser,
        vehicle_id: Uuid,
    ) -> AppResult<ApiResponse<CartSummary>> {
        let mut store = self.state.store.write().await;
        let cart = cart_service::remove_item(&mut store, actor.user_id, vehicle_id)?;

        Ok(ApiResponse::success(cart))
    }

    pub async fn clear(&self, actor: &AuthenticatedUser) -> AppResult<ApiResponse<()>> {
        let mut store = self.state.store.write().await;
        cart_service::clear(&mut store, actor.user_id)?;

        Ok(ApiResponse::message_only("Carrito vaciado"))
    }

    pub async fn checkout(
        &self,
        actor: &AuthenticatedUser,
        request: CheckoutRequest,
    ) -> AppResult<ApiResponse<CheckoutResponse>> {
        // Procesamiento de pago simulado, antes de tomar el lock
        sleep(self.state.config.payment_delay()).await;

        let mut store = self.state.store.write().await;
        let response = cart_service::checkout(
            &mut store,
            actor,
            request.payment_method,
            &request.signature,
            Utc::now(),
        )?;

        let message = format!("¡Reserva confirmada! {} vehículo(s)", response.rentals.len());
        Ok(ApiResponse::success_with_message(response, message))
    }
}
