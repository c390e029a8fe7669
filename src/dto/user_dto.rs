use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserRole;
use crate::utils::validation::{validate_email, validate_phone};

// Alta de usuario por un administrador
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Option<UserRole>,
    pub dni: Option<String>,
    pub address: Option<String>,
    pub license_number: Option<String>,
}

// Actualización parcial de un usuario (admin) o del propio perfil
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 4, max = 100))]
    pub password: Option<String>,
    #[validate(custom = "validate_email")]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
    pub role: Option<UserRole>,
    pub dni: Option<String>,
    pub address: Option<String>,
    pub license_number: Option<String>,
    pub deposit_verified: Option<bool>,
    pub deposit_amount: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserQuery {
    pub search: Option<String>,
    pub role: Option<UserRole>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadResponse {
    pub updated: usize,
}
