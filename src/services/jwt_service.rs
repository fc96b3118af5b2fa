use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::EnvironmentConfig;
use crate::models::usuario::Cargo;
use crate::utils::errors::AppError;

/// Claims del JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// id del usuario
    pub sub: String,
    pub nombre: String,
    pub cargo: String,
    pub exp: i64,
    pub iat: i64,
}

impl JwtClaims {
    pub fn usuario_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::Jwt("ID de usuario inválido".to_string()))
    }
}

/// Servicio JWT
pub struct JwtService {
    algorithm: Algorithm,
    duracion: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: &str, duracion_segundos: u64) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            duracion: Duration::seconds(duracion_segundos as i64),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(&config.jwt_secret, config.jwt_expiration)
    }

    /// Genera un token de acceso
    pub fn generate_token(&self, usuario_id: Uuid, nombre: &str, cargo: Cargo) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: usuario_id.to_string(),
            nombre: nombre.to_string(),
            cargo: cargo.as_str().to_string(),
            exp: (now + self.duracion).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::Jwt(format!("Error generando token: {}", e)))
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AppError> {
        let validation = Validation::new(self.algorithm);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Jwt(format!("Token inválido: {}", e)))
    }
}

/// Extraer token del header Authorization
pub fn extract_bearer(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
