use anyhow::Result;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, error, info, warn};

use super::SnapshotStorage;

/// Backend Redis con ConnectionManager
#[derive(Clone)]
pub struct RedisStorage {
    manager: ConnectionManager,
}

impl RedisStorage {
    pub async fn new(redis_url: &str) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", redis_url);

        let client = redis::Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager })
    }

    fn make_key(key: &str) -> String {
        format!("xyz_rentcar:{}", key)
    }
}

#[async_trait]
impl SnapshotStorage for RedisStorage {
    async fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(Self::make_key(key)).await?;

        match &value {
            Some(_) => debug!("📥 Snapshot encontrado: {}", key),
            None => debug!("❌ Snapshot inexistente: {}", key),
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        let result: RedisResult<()> = conn.set(Self::make_key(key), value).await;

        match result {
            Ok(()) => {
                debug!("💾 Snapshot SET: {}", key);
                Ok(())
            }
            Err(e) => {
                error!("❌ Error guardando snapshot {}: {}", key, e);
                Err(anyhow::anyhow!("Error de Redis: {}", e))
            }
        }
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut conn = self.manager.clone();
        let result: RedisResult<i64> = conn.del(Self::make_key(key)).await;

        if let Err(e) = result {
            warn!("⚠️ Error eliminando snapshot {}: {}", key, e);
            return Err(anyhow::anyhow!("Error de Redis: {}", e));
        }
        debug!("🗑️ Snapshot DELETE: {}", key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_prefixed() {
        assert_eq!(RedisStorage::make_key("xyz_users"), "xyz_rentcar:xyz_users");
    }
}
