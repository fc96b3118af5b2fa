//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use reqwest::Client;
use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::repositories::DocumentStore;
use crate::services::captcha_service::{self, VerificadorCaptcha};
use crate::services::jwt_service::JwtService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<EnvironmentConfig>,
    pub jwt: Arc<JwtService>,
    pub captcha: Arc<dyn VerificadorCaptcha>,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: EnvironmentConfig) -> Self {
        let captcha: Arc<dyn VerificadorCaptcha> =
            Arc::from(captcha_service::desde_config(&config, Client::new()));
        Self::with_captcha(store, config, captcha)
    }

    /// Estado con un verificador de CAPTCHA concreto
    pub fn with_captcha(
        store: Arc<dyn DocumentStore>,
        config: EnvironmentConfig,
        captcha: Arc<dyn VerificadorCaptcha>,
    ) -> Self {
        Self {
            store,
            jwt: Arc::new(JwtService::from_config(&config)),
            config: Arc::new(config),
            captcha,
        }
    }
}
