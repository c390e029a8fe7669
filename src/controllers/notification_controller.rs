use uuid::Uuid;

use crate::dto::user_dto::{MarkAllReadResponse, NotificationQuery};
use crate::dto::ApiResponse;
use crate::middleware::AuthenticatedUser;
use crate::models::Notification;
use crate::services::listing_service;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct NotificationController {
    state: AppState,
}

impl NotificationController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, actor: &AuthenticatedUser, query: NotificationQuery) -> Vec<Notification> {
        let store = self.state.store.read().await;
        listing_service::list_notifications(&store, actor.user_id, query.unread)
    }

    pub async fn mark_read(
        &self,
        actor: &AuthenticatedUser,
        id: Uuid,
    ) -> AppResult<ApiResponse<Notification>> {
        let mut store = self.state.store.write().await;
        let notification = listing_service::mark_notification_read(&mut store, actor.user_id, id)?;

        Ok(ApiResponse::success(notification))
    }

    pub async fn mark_all_read(&self, actor: &AuthenticatedUser) -> AppResult<ApiResponse<MarkAllReadResponse>> {
        let mut store = self.state.store.write().await;
        let updated = listing_service::mark_all_notifications_read(&mut store, actor.user_id)?;

        Ok(ApiResponse::success_with_message(
            MarkAllReadResponse { updated },
            format!("{} notificación(es) marcadas como leídas", updated),
        ))
    }
}
