use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::permiso::Interruptor;
use crate::models::usuario::{Cargo, UsuarioResponse};
use crate::utils::validation::validate_not_empty;

// Registro de usuario
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct RegistroRequest {
    #[serde(rename = "Nombre")]
    #[validate(required(message = "es requerido"), custom = "validate_not_empty")]
    pub nombre: Option<String>,

    #[serde(rename = "Email")]
    #[validate(required(message = "es requerido"), email(message = "email inválido"))]
    pub email: Option<String>,

    #[serde(rename = "Password")]
    #[validate(
        required(message = "es requerido"),
        length(min = 6, message = "debe tener al menos 6 caracteres")
    )]
    pub password: Option<String>,

    #[serde(rename = "Cargo")]
    #[validate(required(message = "es requerido"))]
    pub cargo: Option<Cargo>,

    #[serde(rename = "Unidad", default, skip_serializing_if = "Option::is_none")]
    pub unidad: Option<String>,

    #[serde(rename = "Memorandum", default, skip_serializing_if = "Option::is_none")]
    pub memorandum: Option<NaiveDate>,

    /// Token devuelto por el widget de CAPTCHA
    #[validate(required(message = "es requerido"))]
    pub captcha: Option<String>,
}

// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(rename = "Email")]
    #[validate(required(message = "es requerido"))]
    pub email: Option<String>,

    #[serde(rename = "Password")]
    #[validate(required(message = "es requerido"))]
    pub password: Option<String>,
}

// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: UsuarioResponse,
}

// Actualización de usuario: solo los campos presentes cambian
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ActualizarUsuarioRequest {
    #[serde(rename = "Nombre", default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_not_empty")]
    pub nombre: Option<String>,

    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "email inválido"))]
    pub email: Option<String>,

    #[serde(rename = "Password", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 6, message = "debe tener al menos 6 caracteres"))]
    pub password: Option<String>,

    #[serde(rename = "Cargo", default, skip_serializing_if = "Option::is_none")]
    pub cargo: Option<Cargo>,

    #[serde(rename = "Unidad", default, skip_serializing_if = "Option::is_none")]
    pub unidad: Option<String>,

    #[serde(rename = "Memorandum", default, skip_serializing_if = "Option::is_none")]
    pub memorandum: Option<NaiveDate>,
}

/// Email en su forma canónica: sin espacios y en minúsculas
pub fn normalizar_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn normalizar(email: &mut Option<String>) {
    if let Some(valor) = email.as_mut() {
        *valor = normalizar_email(valor);
    }
}

// El email se normaliza antes de validar
impl RegistroRequest {
    pub fn normalizar(&mut self) {
        normalizar(&mut self.email);
    }
}

impl LoginRequest {
    pub fn normalizar(&mut self) {
        normalizar(&mut self.email);
    }
}

impl ActualizarUsuarioRequest {
    pub fn normalizar(&mut self) {
        normalizar(&mut self.email);
    }
}

// Activar o desactivar un usuario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstadoRequest {
    pub activo: bool,
}

// Accionar un interruptor del editor de permisos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterruptorRequest {
    pub interruptor: Interruptor,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registro_reports_every_missing_field() {
        let request: RegistroRequest = serde_json::from_value(json!({"Nombre": "Ana"})).unwrap();
        let errors = request.validate().unwrap_err();
        let campos = errors.field_errors();

        assert!(campos.contains_key("email") || campos.contains_key("Email"));
        assert!(campos.contains_key("password") || campos.contains_key("Password"));
        assert!(campos.contains_key("captcha"));
    }

    #[test]
    fn test_registro_rejects_short_password_and_bad_email() {
        let request: RegistroRequest = serde_json::from_value(json!({
            "Nombre": "Ana",
            "Email": "no-es-email",
            "Password": "123",
            "Cargo": "técnico",
            "captcha": "tok"
        }))
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_registro_valid() {
        let request: RegistroRequest = serde_json::from_value(json!({
            "Nombre": "Ana",
            "Email": "ana@example.com",
            "Password": "secreto1",
            "Cargo": "encargado",
            "Memorandum": "2024-03-01",
            "captcha": "tok"
        }))
        .unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_email_is_trimmed_before_validation() {
        let mut request = RegistroRequest {
            nombre: Some("Ana".to_string()),
            email: Some("  Ana@Example.COM ".to_string()),
            password: Some("secreto1".to_string()),
            cargo: Some(Cargo::Tecnico),
            captcha: Some("tok".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());

        request.normalizar();
        assert_eq!(request.email.as_deref(), Some("ana@example.com"));
        assert!(request.validate().is_ok());

        let mut login = LoginRequest {
            email: Some(" LUIS@example.com".to_string()),
            password: Some("x".to_string()),
        };
        login.normalizar();
        assert_eq!(login.email.as_deref(), Some("luis@example.com"));
    }

    #[test]
    fn test_actualizar_blank_name_is_invalid() {
        let request = ActualizarUsuarioRequest {
            nombre: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
        assert!(ActualizarUsuarioRequest::default().validate().is_ok());
    }
}
