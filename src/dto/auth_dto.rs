use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::User;
use crate::utils::validation::{validate_email, validate_phone};

// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 100))]
    pub password: String,
}

// Registro de empleado
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 4, max = 100))]
    pub password: String,
    #[validate(custom = "validate_email")]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,
}

// Login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}
