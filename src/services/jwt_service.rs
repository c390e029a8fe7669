use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::models::User;

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Servicio JWT (HS256)
#[derive(Clone)]
pub struct JwtService {
    algorithm: Algorithm,
    access_token_duration: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            access_token_duration: Duration::hours(expiration_hours),
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration_hours)
    }

    /// Duración del token en segundos
    pub fn expires_in(&self) -> i64 {
        self.access_token_duration.num_seconds()
    }

    /// Genera un token de acceso
    pub fn generate_access_token(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let exp = now + self.access_token_duration;

        let claims = JwtClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(self.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation).map(|data| data.claims)
    }

    /// Id del usuario del token. Username y rol viajan en los claims para el
    /// cliente, pero la autorización se resuelve contra el store.
    pub fn subject(&self, token: &str) -> Option<Uuid> {
        let claims = self.validate_token(token).ok()?;
        Uuid::parse_str(&claims.sub).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed::mock_users;

    #[test]
    fn test_generate_and_validate_token() {
        let jwt_service = JwtService::new("test-secret", 24);
        let admin = mock_users().remove(0);

        let token = jwt_service.generate_access_token(&admin).unwrap();
        assert!(!token.is_empty());

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, admin.id.to_string());
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, "admin");

        assert_eq!(jwt_service.subject(&token), Some(admin.id));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let issuer = JwtService::new("secret-a", 24);
        let verifier = JwtService::new("secret-b", 24);
        let token = issuer.generate_access_token(&mock_users().remove(0)).unwrap();

        assert!(verifier.validate_token(&token).is_err());
        assert!(verifier.subject(&token).is_none());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt_service = JwtService::new("test-secret", -2);
        let token = jwt_service.generate_access_token(&mock_users().remove(0)).unwrap();

        assert!(jwt_service.validate_token(&token).is_err());
    }
}
