//! Cliente HTTP de la API
//!
//! Envuelve `reqwest` con la URL base de la API y, si hay sesión, el token
//! Bearer. Cualquier respuesta que no sea 2xx se convierte en
//! `ClienteError::Api` con el mensaje que devolvió el servidor.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::dto::api_response::{ApiResponse, DeleteResponse};
use crate::dto::auth_dto::{LoginRequest, LoginResponse, RegistroRequest};
use crate::models::entidad::{Documento, Entidad};
use crate::models::permiso::Permisos;
use crate::models::usuario::{Usuario, UsuarioResponse};

#[derive(Error, Debug)]
pub enum ClienteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ClienteResult<T> = Result<T, ClienteError>;

/// URL base de la API según el despliegue
#[derive(Debug, Clone)]
pub struct ClienteConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClienteConfig {
    /// `API_URL_PRODUCTION` con `ENVIRONMENT=production`, si no
    /// `API_URL_DEVELOPMENT`
    pub fn desde_entorno() -> ClienteResult<Self> {
        let entorno = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let variable = if entorno == "production" {
            "API_URL_PRODUCTION"
        } else {
            "API_URL_DEVELOPMENT"
        };

        let base_url = std::env::var(variable)
            .map_err(|_| ClienteError::Config(format!("{} must be set", variable)))?;

        Ok(Self::new(base_url))
    }

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Cliente de la API de gestión de maquinaria
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: ClienteConfig) -> ClienteResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url,
            token: None,
        })
    }

    /// Copia del cliente que envía el token en cada request
    pub fn con_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, ruta: &str) -> String {
        format!("{}/api/{}", self.base_url, ruta)
    }

    fn url_entidad<E: Entidad>(&self, id: Option<Uuid>) -> String {
        match id {
            Some(id) => self.url(&format!("{}/{}", E::DESCRIPTOR.ruta, id)),
            None => self.url(E::DESCRIPTOR.ruta),
        }
    }

    pub async fn listar<E: Entidad>(&self) -> ClienteResult<Vec<Documento<E>>> {
        self.enviar(self.client.get(self.url_entidad::<E>(None))).await
    }

    pub async fn obtener<E: Entidad>(&self, id: Uuid) -> ClienteResult<Documento<E>> {
        self.enviar(self.client.get(self.url_entidad::<E>(Some(id)))).await
    }

    pub async fn crear<E: Entidad>(&self, formulario: &Value) -> ClienteResult<Documento<E>> {
        self.enviar(self.client.post(self.url_entidad::<E>(None)).json(formulario))
            .await
    }

    pub async fn actualizar<E: Entidad>(&self, id: Uuid, formulario: &Value) -> ClienteResult<Documento<E>> {
        self.enviar(self.client.put(self.url_entidad::<E>(Some(id))).json(formulario))
            .await
    }

    pub async fn eliminar<E: Entidad>(&self, id: Uuid) -> ClienteResult<DeleteResponse> {
        self.enviar(self.client.delete(self.url_entidad::<E>(Some(id)))).await
    }

    pub async fn registrar(&self, request: &RegistroRequest) -> ClienteResult<UsuarioResponse> {
        let respuesta: ApiResponse<UsuarioResponse> = self
            .enviar(self.client.post(self.url(&format!("{}/registro", Usuario::RUTA))).json(request))
            .await?;

        respuesta.data.ok_or_else(|| ClienteError::Api {
            status: 200,
            message: "Respuesta de registro sin usuario".to_string(),
        })
    }

    pub async fn login(&self, email: &str, password: &str) -> ClienteResult<LoginResponse> {
        let request = LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };
        self.enviar(self.client.post(self.url(&format!("{}/login", Usuario::RUTA))).json(&request))
            .await
    }

    pub async fn usuario(&self, id: Uuid) -> ClienteResult<UsuarioResponse> {
        self.enviar(self.client.get(self.url(&format!("{}/{}", Usuario::RUTA, id))))
            .await
    }

    pub async fn reemplazar_permisos(&self, id: Uuid, permisos: &Permisos) -> ClienteResult<UsuarioResponse> {
        self.enviar(
            self.client
                .put(self.url(&format!("{}/{}/permisos", Usuario::RUTA, id)))
                .json(permisos),
        )
        .await
    }

    /// Envía la request y decodifica la respuesta
    async fn enviar<T: DeserializeOwned>(&self, request: RequestBuilder) -> ClienteResult<T> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let cuerpo = response.text().await.unwrap_or_default();
            let message = mensaje_de_error(&cuerpo).unwrap_or_else(|| format!("Error HTTP: {}", status));
            log::warn!("❌ API respondió {}: {}", status, message);
            return Err(ClienteError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Mensaje del cuerpo `{error, message}` que devuelve la API
fn mensaje_de_error(cuerpo: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct CuerpoError {
        message: String,
    }

    serde_json::from_str::<CuerpoError>(cuerpo)
        .ok()
        .map(|c| c.message)
        .or_else(|| (!cuerpo.trim().is_empty()).then(|| cuerpo.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trims_trailing_slash() {
        let config = ClienteConfig::new("http://localhost:3000/");
        assert_eq!(config.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_mensaje_de_error() {
        assert_eq!(
            mensaje_de_error(r#"{"error":"Not Found","message":"Maquinaria no encontrado"}"#).as_deref(),
            Some("Maquinaria no encontrado")
        );
        assert_eq!(mensaje_de_error("texto plano").as_deref(), Some("texto plano"));
        assert_eq!(mensaje_de_error(""), None);
    }

    // Único test que toca variables de entorno del proceso
    #[test]
    fn test_desde_entorno_picks_url_by_environment() {
        std::env::set_var("ENVIRONMENT", "production");
        std::env::set_var("API_URL_PRODUCTION", "https://api.flota.example/");
        std::env::set_var("API_URL_DEVELOPMENT", "http://localhost:3000");
        let config = ClienteConfig::desde_entorno().unwrap();
        assert_eq!(config.base_url, "https://api.flota.example");

        std::env::set_var("ENVIRONMENT", "development");
        assert_eq!(ClienteConfig::desde_entorno().unwrap().base_url, "http://localhost:3000");

        std::env::remove_var("API_URL_DEVELOPMENT");
        assert!(matches!(ClienteConfig::desde_entorno(), Err(ClienteError::Config(_))));

        std::env::remove_var("ENVIRONMENT");
        std::env::remove_var("API_URL_PRODUCTION");
    }

    #[test]
    fn test_url_entidad() {
        let api = ApiClient::new(ClienteConfig::new("http://api.local")).unwrap();
        let id = Uuid::nil();
        assert_eq!(
            api.url_entidad::<crate::models::Maquinaria>(None),
            "http://api.local/api/maquinaria"
        );
        assert_eq!(
            api.url_entidad::<crate::models::Soat>(Some(id)),
            format!("http://api.local/api/soat/{}", id)
        );
    }
}
