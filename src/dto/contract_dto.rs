use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Contract, ContractStatus, Payment, PaymentMethod};
use crate::utils::validation::validate_non_negative_amount;

// Request para generar el contrato preliminar de una renta
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractRequest {
    pub rental_id: Uuid,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_dni: String,
    #[serde(default)]
    pub customer_license: String,
    #[validate(custom = "validate_non_negative_amount")]
    pub deposit_amount: Option<Decimal>,
    pub notes: Option<String>,
    #[serde(default)]
    pub company_signature: String,
    #[serde(default)]
    pub client_signature: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExtendContractRequest {
    #[validate(range(min = 1, max = 365, message = "Por favor ingresa entre 1 y 365 días adicionales"))]
    pub additional_days: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FinishContractRequest {
    #[serde(default)]
    pub has_damages: bool,
    pub damage_description: Option<String>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative_amount")]
    pub damage_charges: Decimal,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CancelContractRequest {
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignVehicleRequest {
    pub vehicle_id: Uuid,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContractQuery {
    pub status: Option<ContractStatus>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishContractResponse {
    pub contract: Contract,
    pub total_to_pay: Decimal,
    pub payment: Payment,
}
