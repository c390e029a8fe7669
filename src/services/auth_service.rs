//! Servicio de autenticación
//!
//! Verificación de credenciales contra la lista de usuarios y alta de
//! empleados. El hash de contraseñas se calcula fuera del lock del store.

use bcrypt::{hash, verify};
use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::dto::auth_dto::{LoginRequest, RegisterRequest};
use crate::models::{User, UserRole};
use crate::store::{AppStore, Mutation};
use crate::utils::errors::{conflict_error, AppError, AppResult};

/// Genera el hash bcrypt de una contraseña
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    Ok(hash(password, cost)?)
}

/// Compara contra un hash bcrypt o, en snapshots heredados, contra texto plano
pub fn verify_password(password: &str, stored: &str) -> AppResult<bool> {
    if stored.starts_with("$2") {
        Ok(verify(password, stored)?)
    } else {
        Ok(password == stored)
    }
}

/// Busca al usuario y verifica su contraseña
pub fn authenticate(store: &AppStore, request: &LoginRequest) -> AppResult<User> {
    let invalid = || AppError::Unauthorized("Usuario o contraseña incorrectos".to_string());

    let user = store.user_by_username(&request.username).ok_or_else(invalid)?;
    let stored = user.password.as_deref().ok_or_else(invalid)?;

    if !verify_password(&request.password, stored)? {
        warn!("🔒 Contraseña incorrecta para {}", request.username);
        return Err(invalid());
    }

    info!("🔑 Login correcto: {}", user.username);
    Ok(user.clone())
}

/// Registra un empleado nuevo en la lista de usuarios
pub fn register(
    store: &mut AppStore,
    request: RegisterRequest,
    password_hash: String,
    now: DateTime<Utc>,
) -> AppResult<User> {
    if store.user_by_username(&request.username).is_some() {
        return Err(conflict_error(format!(
            "El usuario '{}' ya existe",
            request.username
        )));
    }

    let user = User {
        id: Uuid::new_v4(),
        username: request.username,
        password: Some(password_hash),
        email: request.email,
        name: request.name,
        phone: request.phone.unwrap_or_default(),
        role: UserRole::Empleado,
        dni: None,
        address: None,
        license_number: None,
        deposit_verified: false,
        deposit_amount: None,
        created_at: now,
    };

    store.commit(vec![Mutation::PutUser(user.clone())])?;
    info!("👤 Empleado registrado: {}", user.username);
    Ok(user)
}
