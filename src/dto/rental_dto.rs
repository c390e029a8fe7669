use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::{RentalStatus, ReservationType};
use crate::utils::validation::{validate_email, validate_non_negative_amount};

// Request para crear una renta o pre-reserva
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalRequest {
    pub vehicle_id: Uuid,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub pickup_location: String,
    #[serde(default)]
    pub return_location: String,
    pub reservation_type: Option<ReservationType>,
    #[validate(custom = "validate_non_negative_amount")]
    pub initial_payment: Option<Decimal>,
    #[validate(custom = "validate_non_negative_amount")]
    pub deposit: Option<Decimal>,
    pub customer_name: Option<String>,
    #[validate(custom = "validate_email")]
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_dni: Option<String>,
    pub customer_license: Option<String>,
}

/// Vistas del listado de reservas
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RentalView {
    PreReservations,
    Confirmed,
    #[default]
    All,
}

#[derive(Debug, Default, Deserialize)]
pub struct RentalQuery {
    #[serde(default)]
    pub view: RentalView,
    pub search: Option<String>,
    pub status: Option<RentalStatus>,
}
