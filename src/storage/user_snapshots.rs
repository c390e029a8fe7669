//! Snapshots de usuarios y sesión
//!
//! Los fallos de escritura se registran y se ignoran; el estado en memoria sigue
//! siendo la fuente de verdad mientras el proceso viva.

use tracing::{error, info, warn};

use crate::models::User;
use crate::store::seed::mock_users;

use super::SnapshotStorage;

pub const USERS_KEY: &str = "xyz_users";
pub const SESSION_KEY: &str = "xyz_user";

/// Cargar la lista de usuarios al arrancar
pub async fn load_users(storage: &dyn SnapshotStorage) -> Vec<User> {
    let raw = match storage.get_raw(USERS_KEY).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("⚠️ No se pudo leer {}: {}", USERS_KEY, e);
            None
        }
    };

    let users = match raw {
        None => {
            info!("👤 Sin usuarios guardados, usando usuarios iniciales");
            mock_users()
        }
        Some(raw) => match serde_json::from_str::<Vec<User>>(&raw) {
            Ok(mut users) => {
                if users.iter().any(|u| u.username == "admin") {
                    info!("👥 {} usuarios cargados desde {}", users.len(), USERS_KEY);
                    return users;
                }
                warn!("⚠️ No hay usuario admin guardado, agregando usuarios iniciales");
                users.extend(mock_users());
                users
            }
            Err(e) => {
                error!("❌ Error leyendo {}: {}. Se restablecen los usuarios iniciales", USERS_KEY, e);
                mock_users()
            }
        },
    };

    save_users(storage, &users).await;
    users
}

pub async fn save_users(storage: &dyn SnapshotStorage, users: &[User]) {
    let raw = match serde_json::to_string(users) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("⚠️ No se pudo serializar {}: {}", USERS_KEY, e);
            return;
        }
    };

    if let Err(e) = storage.set_raw(USERS_KEY, &raw).await {
        warn!("⚠️ No se pudo guardar {}: {}", USERS_KEY, e);
    }
}

/// Guardar la sesión actual, siempre sin contraseña
pub async fn save_session(storage: &dyn SnapshotStorage, user: &User) {
    let raw = match serde_json::to_string(&user.without_password()) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("⚠️ No se pudo serializar {}: {}", SESSION_KEY, e);
            return;
        }
    };

    if let Err(e) = storage.set_raw(SESSION_KEY, &raw).await {
        warn!("⚠️ No se pudo guardar {}: {}", SESSION_KEY, e);
    }
}

pub async fn load_session(storage: &dyn SnapshotStorage) -> Option<User> {
    let raw = storage.get_raw(SESSION_KEY).await.ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("⚠️ Sesión guardada inválida: {}", e);
            None
        }
    }
}

pub async fn clear_session(storage: &dyn SnapshotStorage) {
    if let Err(e) = storage.remove(SESSION_KEY).await {
        warn!("⚠️ No se pudo eliminar {}: {}", SESSION_KEY, e);
    }
}
