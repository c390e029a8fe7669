use chrono::Utc;
use tokio::time::sleep;
use tracing::info;
use validator::Validate;

use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegisterRequest};
use crate::dto::user_dto::UpdateUserRequest;
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::User;
use crate::services::{auth_service, user_service};
use crate::state::AppState;
use crate::storage::user_snapshots;
use crate::utils::errors::{not_found_error, AppResult};

use super::persist_users;

pub struct AuthController {
    state: AppState,
}

impl AuthController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    fn login_response(&self, user: &User) -> AppResult<LoginResponse> {
        let access_token = self.state.jwt.generate_access_token(user)?;
        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.state.jwt.expires_in(),
            user: user.without_password(),
        })
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
        request.validate()?;

        // Latencia simulada, no cancelable
        sleep(self.state.config.auth_delay()).await;

        let user = {
            let store = self.state.store.read().await;
            auth_service::authenticate(&store, &request)?
        };

        user_snapshots::save_session(self.state.snapshots.as_ref(), &user).await;
        let response = self.login_response(&user)?;

        Ok(ApiResponse::success_with_message(
            response,
            format!("Bienvenido, {}", user.name),
        ))
    }

    pub async fn register(&self, request: RegisterRequest) -> AppResult<ApiResponse<LoginResponse>> {
        request.validate()?;

        sleep(self.state.config.auth_delay()).await;
        let password_hash = auth_service::hash_password(&request.password, self.state.config.bcrypt_cost)?;

        let user = {
            let mut store = self.state.store.write().await;
            let user = auth_service::register(&mut store, request, password_hash, Utc::now())?;
            persist_users(&self.state, &mut store).await;
            user
        };

        user_snapshots::save_session(self.state.snapshots.as_ref(), &user).await;
        let response = self.login_response(&user)?;

        Ok(ApiResponse::success_with_message(
            response,
            "Cuenta creada exitosamente",
        ))
    }

    pub async fn logout(&self, actor: &AuthenticatedUser) -> ApiResponse<()> {
        user_snapshots::clear_session(self.state.snapshots.as_ref()).await;
        info!("👋 Sesión cerrada: {}", actor.username);
        ApiResponse::message_only("Sesión cerrada")
    }

    pub async fn me(&self, actor: &AuthenticatedUser) -> AppResult<ApiResponse<User>> {
        let store = self.state.store.read().await;
        let user = store
            .user(actor.user_id)
            .map(User::without_password)
            .ok_or_else(|| not_found_error("Usuario", actor.user_id))?;
        Ok(ApiResponse::success(user))
    }

    pub async fn update_me(
        &self,
        actor: &AuthenticatedUser,
        request: UpdateUserRequest,
    ) -> AppResult<ApiResponse<User>> {
        request.validate()?;

        let password_hash = match &request.password {
            Some(password) => Some(auth_service::hash_password(password, self.state.config.bcrypt_cost)?),
            None => None,
        };

        let mut store = self.state.store.write().await;
        let user = user_service::update_user(&mut store, actor.user_id, request, password_hash, false)?;
        persist_users(&self.state, &mut store).await;
        user_snapshots::save_session(self.state.snapshots.as_ref(), &user).await;

        Ok(ApiResponse::success_with_message(user, "Perfil actualizado"))
    }
}
