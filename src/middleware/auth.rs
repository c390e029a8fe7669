//! Middleware de autenticación JWT
//!
//! Este módulo maneja la extracción del token Bearer y la inyección del
//! usuario autenticado en las extensions de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{
    models::UserRole,
    state::AppState,
    utils::errors::{AppError, AppResult},
};

/// Usuario autenticado que se inyecta en las requests
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn require_admin(&self, message: &str) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Forbidden(message.to_string()))
        }
    }
}

/// Middleware de autenticación JWT
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|auth_str| auth_str.to_str().ok())
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let user_id = state
        .jwt
        .subject(token)
        .ok_or_else(|| AppError::Unauthorized("Token inválido".to_string()))?;

    // El usuario pudo ser eliminado o cambiar de rol después de emitir el token:
    // la identidad vigente es la del store, no la de los claims
    let authenticated = {
        let store = state.store.read().await;
        let user = store
            .user(user_id)
            .ok_or_else(|| AppError::Unauthorized("Usuario no encontrado".to_string()))?;
        AuthenticatedUser {
            user_id,
            username: user.username.clone(),
            role: user.role,
        }
    };

    request.extensions_mut().insert(authenticated);

    Ok(next.run(request).await)
}
