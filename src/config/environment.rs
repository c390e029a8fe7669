//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno. Todas las variables tienen un
//! valor por defecto para poder arrancar en desarrollo sin `.env`.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Backend de snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
}

impl StorageBackend {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Some(StorageBackend::Memory),
            "file" => Some(StorageBackend::File),
            "redis" => Some(StorageBackend::Redis),
            _ => None,
        }
    }
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    /// Vacío significa CORS permisivo
    pub cors_origins: Vec<String>,
    pub storage_backend: StorageBackend,
    pub storage_dir: String,
    pub redis_url: String,
    pub bcrypt_cost: u32,
    pub auth_delay_ms: u64,
    pub payment_delay_ms: u64,
    pub seed_mock_data: bool,
    pub log_level: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            jwt_secret: "xyz-rentcar-dev-secret-change-in-production".to_string(),
            jwt_expiration_hours: 24,
            cors_origins: Vec::new(),
            storage_backend: StorageBackend::Memory,
            storage_dir: "./data".to_string(),
            redis_url: "redis://127.0.0.1:6379".to_string(),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            auth_delay_ms: 500,
            payment_delay_ms: 2000,
            seed_mock_data: true,
            log_level: "info".to_string(),
        }
    }
}

impl EnvironmentConfig {
    /// Leer la configuración del entorno, usando los valores por defecto para lo que falte
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let storage_backend = match env::var("STORAGE_BACKEND") {
            Ok(value) => StorageBackend::from_str(&value).unwrap_or_else(|| {
                warn!("⚠️ STORAGE_BACKEND '{}' desconocido, usando memoria", value);
                StorageBackend::Memory
            }),
            Err(_) => defaults.storage_backend,
        };

        Self {
            environment: env_or("ENVIRONMENT", defaults.environment),
            port: parse_or("PORT", defaults.port),
            host: env_or("HOST", defaults.host),
            jwt_secret: env_or("JWT_SECRET", defaults.jwt_secret),
            jwt_expiration_hours: parse_or("JWT_EXPIRATION_HOURS", defaults.jwt_expiration_hours),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|value| parse_origins(&value))
                .unwrap_or(defaults.cors_origins),
            storage_backend,
            storage_dir: env_or("STORAGE_DIR", defaults.storage_dir),
            redis_url: env_or("REDIS_URL", defaults.redis_url),
            bcrypt_cost: parse_or("BCRYPT_COST", defaults.bcrypt_cost),
            auth_delay_ms: parse_or("AUTH_DELAY_MS", defaults.auth_delay_ms),
            payment_delay_ms: parse_or("PAYMENT_DELAY_MS", defaults.payment_delay_ms),
            seed_mock_data: parse_or("SEED_MOCK_DATA", defaults.seed_mock_data),
            log_level: env_or("LOG_LEVEL", defaults.log_level),
        }
    }

    /// Configuración rápida para tests: sin latencias simuladas y bcrypt barato
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            bcrypt_cost: 4,
            auth_delay_ms: 0,
            payment_delay_ms: 0,
            ..Self::default()
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth_delay_ms)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }
}

fn env_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("⚠️ Valor inválido para {}: '{}', usando el valor por defecto", key, value);
            default
        }),
        Err(_) => default,
    }
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_parsing() {
        assert_eq!(StorageBackend::from_str("FILE"), Some(StorageBackend::File));
        assert_eq!(StorageBackend::from_str(" redis "), Some(StorageBackend::Redis));
        assert_eq!(StorageBackend::from_str("postgres"), None);
    }

    #[test]
    fn test_parse_origins_skips_blanks() {
        assert_eq!(
            parse_origins("http://localhost:5173, ,https://xyz.com"),
            vec!["http://localhost:5173".to_string(), "https://xyz.com".to_string()]
        );
    }

    #[test]
    fn test_defaults() {
        let config = EnvironmentConfig::default();
        assert_eq!(config.server_url(), "0.0.0.0:3000");
        assert_eq!(config.auth_delay(), Duration::from_millis(500));
        assert_eq!(config.payment_delay(), Duration::from_millis(2000));
        assert!(config.is_development());
    }
}
