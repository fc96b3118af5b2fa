//! Middleware de CORS
//!
//! En desarrollo se acepta cualquier origen; fuera de desarrollo solo los
//! de `CORS_ORIGINS`. Sin orígenes configurados no se admite ninguno.

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::config::EnvironmentConfig;

/// CORS para desarrollo: permite cualquier origen
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// CORS con orígenes específicos
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let origenes: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(valor) => Some(valor),
            Err(_) => {
                tracing::warn!("⚠️ Origen CORS inválido ignorado: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origenes)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Elegir la capa de CORS según el entorno
pub fn cors_desde_config(config: &EnvironmentConfig) -> CorsLayer {
    if config.is_development() {
        return cors_middleware();
    }
    if config.cors_origins.is_empty() {
        tracing::warn!(
            "⚠️ CORS_ORIGINS vacío en {}: no se admiten orígenes cruzados",
            config.environment
        );
    }
    cors_middleware_with_origins(&config.cors_origins)
}
