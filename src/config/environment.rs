//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.
//! Los secretos (JWT, CAPTCHA) solo se leen del entorno, nunca del código.

use anyhow::{Context, Result};
use std::env;

/// Backend de almacenamiento de documentos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub log_level: String,
    pub storage_backend: StorageBackend,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    /// Si es `false` la puerta de permisos deja pasar todo, como el original
    pub enforce_permissions: bool,
    pub captcha_secret: Option<String>,
    pub captcha_verify_url: String,
    /// Cuenta admin que se asegura al arrancar
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let storage_backend = match env::var("STORAGE_BACKEND").as_deref() {
            Ok("memory") => StorageBackend::Memory,
            Ok("postgres") | Err(_) => StorageBackend::Postgres,
            Ok(other) => anyhow::bail!("STORAGE_BACKEND desconocido: {}", other),
        };

        let config = Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            storage_backend,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expiration: env::var("JWT_EXPIRATION")
                .unwrap_or_else(|_| "86400".to_string())
                .parse()
                .context("JWT_EXPIRATION must be a valid number")?,
            bcrypt_cost: env::var("BCRYPT_COST")
                .map(|v| v.parse())
                .unwrap_or(Ok(bcrypt::DEFAULT_COST))
                .context("BCRYPT_COST must be a valid number")?,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            enforce_permissions: env::var("ENFORCE_PERMISSIONS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            captcha_secret: env::var("CAPTCHA_SECRET").ok().filter(|s| !s.is_empty()),
            captcha_verify_url: env::var("CAPTCHA_VERIFY_URL")
                .unwrap_or_else(|_| "https://www.google.com/recaptcha/api/siteverify".to_string()),
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|s| !s.trim().is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|s| !s.is_empty()),
        };
        config.validar()?;
        Ok(config)
    }

    /// Combinaciones que no deben llegar a arrancar
    pub fn validar(&self) -> Result<()> {
        if self.environment == "production" && self.cors_origins.is_empty() {
            anyhow::bail!("CORS_ORIGINS must be set in production");
        }
        if self.admin_email.is_some() != self.admin_password.is_some() {
            anyhow::bail!("ADMIN_EMAIL and ADMIN_PASSWORD must be set together");
        }
        Ok(())
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Nivel de logging para tracing; `info` si el valor no se entiende
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
