use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::rental_dto::{CreateRentalRequest, RentalQuery};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::Rental;
use crate::services::{booking_service, listing_service};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct RentalController {
    state: AppState,
}

impl RentalController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, query: RentalQuery) -> Vec<Rental> {
        let store = self.state.store.read().await;
        listing_service::list_rentals(&store, &query)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Rental> {
        let store = self.state.store.read().await;
        listing_service::get_rental(&store, id)
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateRentalRequest,
    ) -> AppResult<ApiResponse<Rental>> {
        request.validate()?;

        // Verificación y alta bajo el mismo lock de escritura
        let mut store = self.state.store.write().await;
        let rental = booking_service::create_rental(&mut store, actor, request, Utc::now())?;

        let message = match rental.pre_reserve_position {
            Some(position) => format!(
                "Pre-reserva {} creada (posición {}/3)",
                rental.registration_number, position
            ),
            None => format!("Reserva {} confirmada", rental.registration_number),
        };
        Ok(ApiResponse::success_with_message(rental, message))
    }

    pub async fn cancel(&self, id: Uuid) -> AppResult<ApiResponse<Rental>> {
        let mut store = self.state.store.write().await;
        let rental = booking_service::cancel_rental(&mut store, id)?;

        Ok(ApiResponse::success_with_message(rental, "Pre-reserva cancelada"))
    }
}
