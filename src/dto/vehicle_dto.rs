use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::VehicleStatus;
use crate::utils::validation::{validate_license_plate, validate_positive_amount};

/// Filtros del catálogo; las listas van separadas por comas
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub price_band: Option<String>,
    pub status: Option<VehicleStatus>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub car_types: Option<String>,
    pub transmissions: Option<String>,
    pub passengers: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub brand: String,
    #[validate(length(min = 1, max = 50))]
    pub model: String,
    pub year: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(custom = "validate_positive_amount")]
    pub price_per_day: Decimal,
    #[validate(custom = "validate_license_plate")]
    pub license_plate: String,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    #[validate(range(min = 1, max = 20))]
    pub seats: Option<u32>,
    pub mileage: Option<u32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
}

// Request para actualizar un vehículo; el estado se cambia por su propio endpoint
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 50))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,
    pub year: Option<i32>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    #[validate(custom = "validate_positive_amount")]
    pub price_per_day: Option<Decimal>,
    #[validate(custom = "validate_license_plate")]
    pub license_plate: Option<String>,
    pub transmission: Option<String>,
    pub fuel_type: Option<String>,
    #[validate(range(min = 1, max = 20))]
    pub seats: Option<u32>,
    pub mileage: Option<u32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVehicleStatusRequest {
    pub status: VehicleStatus,
}
