//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::services::jwt_service::JwtService;
use crate::storage::SnapshotStorage;
use crate::store::AppStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<AppStore>>,
    pub config: EnvironmentConfig,
    pub jwt: JwtService,
    pub snapshots: Arc<dyn SnapshotStorage>,
}

impl AppState {
    pub fn new(store: AppStore, config: EnvironmentConfig, snapshots: Arc<dyn SnapshotStorage>) -> Self {
        let jwt = JwtService::from_config(&config);
        Self {
            store: Arc::new(RwLock::new(store)),
            config,
            jwt,
            snapshots,
        }
    }
}
