//! Persistencia clave/valor de snapshots
//!
//! Solo dos claves sobreviven a un reinicio: la lista de usuarios (`xyz_users`)
//! y la sesión actual (`xyz_user`). El backend se elige con `STORAGE_BACKEND`.

pub mod file_storage;
pub mod memory_storage;
pub mod redis_storage;
pub mod user_snapshots;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::config::environment::{EnvironmentConfig, StorageBackend};

pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use redis_storage::RedisStorage;

/// Operaciones de un backend de snapshots
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    async fn get_raw(&self, key: &str) -> Result<Option<String>>;
    async fn set_raw(&self, key: &str, value: &str) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Construir el backend configurado
pub async fn build_storage(config: &EnvironmentConfig) -> Result<Arc<dyn SnapshotStorage>> {
    let storage: Arc<dyn SnapshotStorage> = match config.storage_backend {
        StorageBackend::Memory => {
            info!("🧠 Snapshots en memoria (se pierden al reiniciar)");
            Arc::new(MemoryStorage::new())
        }
        StorageBackend::File => {
            info!("📁 Snapshots en disco: {}", config.storage_dir);
            Arc::new(FileStorage::new(&config.storage_dir).await?)
        }
        StorageBackend::Redis => Arc::new(RedisStorage::new(&config.redis_url).await?),
    };

    Ok(storage)
}
