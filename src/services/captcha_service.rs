//! Verificación de CAPTCHA
//!
//! El registro de usuarios verifica el token del CAPTCHA contra el servicio
//! externo antes de escribir nada. El secreto viene de la configuración.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::EnvironmentConfig;
use crate::utils::errors::AppError;

#[async_trait]
pub trait VerificadorCaptcha: Send + Sync {
    /// `Ok(false)` si el servicio rechaza el token
    async fn verificar(&self, token: &str) -> Result<bool, AppError>;
}

/// Respuesta de `siteverify`
#[derive(Debug, Deserialize)]
struct RespuestaVerificacion {
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

/// Verificador contra reCAPTCHA (o cualquier servicio con la misma API)
pub struct RecaptchaService {
    client: Client,
    secret: String,
    verify_url: String,
}

impl RecaptchaService {
    pub fn new(client: Client, secret: String, verify_url: String) -> Self {
        Self {
            client,
            secret,
            verify_url,
        }
    }
}

#[async_trait]
impl VerificadorCaptcha for RecaptchaService {
    async fn verificar(&self, token: &str) -> Result<bool, AppError> {
        if token.trim().is_empty() {
            return Ok(false);
        }

        let respuesta = self
            .client
            .post(&self.verify_url)
            .form(&[("secret", self.secret.as_str()), ("response", token)])
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("CAPTCHA no disponible: {}", e)))?;

        if !respuesta.status().is_success() {
            return Err(AppError::ExternalApi(format!(
                "CAPTCHA respondió {}",
                respuesta.status()
            )));
        }

        let cuerpo: RespuestaVerificacion = respuesta
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Respuesta de CAPTCHA ilegible: {}", e)))?;

        if !cuerpo.success {
            log::warn!("🤖 CAPTCHA rechazado: {:?}", cuerpo.error_codes);
        }
        Ok(cuerpo.success)
    }
}

/// Sin secreto configurado no hay verificación; se avisa en cada registro
pub struct CaptchaDeshabilitado;

#[async_trait]
impl VerificadorCaptcha for CaptchaDeshabilitado {
    async fn verificar(&self, _token: &str) -> Result<bool, AppError> {
        log::warn!("⚠️ CAPTCHA_SECRET no configurado, se omite la verificación");
        Ok(true)
    }
}

/// Elegir el verificador según la configuración
pub fn desde_config(config: &EnvironmentConfig, client: Client) -> Box<dyn VerificadorCaptcha> {
    match &config.captcha_secret {
        Some(secret) => Box::new(RecaptchaService::new(
            client,
            secret.clone(),
            config.captcha_verify_url.clone(),
        )),
        None => Box::new(CaptchaDeshabilitado),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_verifier_accepts() {
        assert!(CaptchaDeshabilitado.verificar("").await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_token_is_rejected_without_calling_out() {
        let servicio = RecaptchaService::new(
            Client::new(),
            "secreto".to_string(),
            "http://127.0.0.1:9/verify".to_string(),
        );
        assert!(!servicio.verificar("  ").await.unwrap());
    }

    #[tokio::test]
    async fn test_unreachable_service_is_external_error() {
        let servicio = RecaptchaService::new(
            Client::new(),
            "secreto".to_string(),
            "http://127.0.0.1:9/verify".to_string(),
        );
        assert!(matches!(
            servicio.verificar("token").await,
            Err(AppError::ExternalApi(_))
        ));
    }

    #[test]
    fn test_respuesta_parse() {
        let r: RespuestaVerificacion =
            serde_json::from_str(r#"{"success": false, "error-codes": ["invalid-input-response"]}"#).unwrap();
        assert!(!r.success);
        assert_eq!(r.error_codes, vec!["invalid-input-response"]);
    }
}
