use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserQuery};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::User;
use crate::services::{auth_service, user_service};
use crate::state::AppState;
use crate::utils::errors::AppResult;

use super::persist_users;

const ADMIN_ONLY: &str = "Solo los administradores pueden gestionar usuarios";

pub struct UserController {
    state: AppState,
}

impl UserController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, actor: &AuthenticatedUser, query: UserQuery) -> AppResult<Vec<User>> {
        actor.require_admin(ADMIN_ONLY)?;
        let store = self.state.store.read().await;
        Ok(user_service::list_users(&store, &query))
    }

    pub async fn get(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<User> {
        if actor.user_id != id {
            actor.require_admin(ADMIN_ONLY)?;
        }
        let store = self.state.store.read().await;
        user_service::get_user(&store, id)
    }

    pub async fn create(
        &self,
        actor: &AuthenticatedUser,
        request: CreateUserRequest,
    ) -> AppResult<ApiResponse<User>> {
        user_service::check_create_request(actor, &request)?;
        request.validate()?;

        let password_hash = auth_service::hash_password(&request.password, self.state.config.bcrypt_cost)?;

        let mut store = self.state.store.write().await;
        let user = user_service::create_user(&mut store, actor, request, password_hash, Utc::now())?;
        persist_users(&self.state, &mut store).await;

        Ok(ApiResponse::success_with_message(user, "Usuario creado exitosamente"))
    }

    pub async fn update(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
        request: UpdateUserRequest,
    ) -> AppResult<ApiResponse<User>> {
        actor.require_admin(ADMIN_ONLY)?;
        request.validate()?;

        let password_hash = match &request.password {
            Some(password) => Some(auth_service::hash_password(password, self.state.config.bcrypt_cost)?),
            None => None,
        };

        let mut store = self.state.store.write().await;
        let user = user_service::update_user(&mut store, id, request, password_hash, true)?;
        persist_users(&self.state, &mut store).await;

        Ok(ApiResponse::success_with_message(user, "Usuario actualizado"))
    }

    pub async fn delete(&self, actor: &AuthenticatedUser, id: Uuid) -> AppResult<ApiResponse<()>> {
        let mut store = self.state.store.write().await;
        user_service::delete_user(&mut store, actor, id)?;
        persist_users(&self.state, &mut store).await;

        Ok(ApiResponse::message_only("Usuario eliminado"))
    }
}
