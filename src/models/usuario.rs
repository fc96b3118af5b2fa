//! Modelo de Usuario
//!
//! La contraseña solo se guarda como hash bcrypt y nunca sale en las
//! respuestas; para eso está `UsuarioResponse`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::entidad::Documento;
use crate::models::permiso::Permisos;

/// Cargo del usuario dentro de la organización
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cargo {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "encargado")]
    Encargado,
    #[serde(rename = "técnico", alias = "tecnico")]
    Tecnico,
}

impl Cargo {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cargo::Admin => "admin",
            Cargo::Encargado => "encargado",
            Cargo::Tecnico => "técnico",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Cargo::Admin),
            "encargado" => Some(Cargo::Encargado),
            "técnico" | "tecnico" => Some(Cargo::Tecnico),
            _ => None,
        }
    }
}

/// Usuario tal como se guarda en la colección `usuarios`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(rename = "Nombre")]
    pub nombre: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "PasswordHash")]
    pub password_hash: String,
    #[serde(rename = "Cargo")]
    pub cargo: Cargo,
    #[serde(rename = "Unidad", default, skip_serializing_if = "Option::is_none")]
    pub unidad: Option<String>,
    #[serde(rename = "Memorandum", default, skip_serializing_if = "Option::is_none")]
    pub memorandum: Option<NaiveDate>,
    #[serde(default = "activo_por_defecto")]
    pub activo: bool,
    #[serde(rename = "Permiso", default)]
    pub permiso: Permisos,
}

fn activo_por_defecto() -> bool {
    true
}

impl Usuario {
    /// Colección de cuentas. Los usuarios no pasan por el CRUD genérico.
    pub const COLECCION: &'static str = "usuarios";
    /// Segmento de la ruta bajo `/api`
    pub const RUTA: &'static str = "usuarios";
}

/// Usuario para la API, sin hash de contraseña
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsuarioResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(rename = "Nombre")]
    pub nombre: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Cargo")]
    pub cargo: Cargo,
    #[serde(rename = "Unidad", default, skip_serializing_if = "Option::is_none")]
    pub unidad: Option<String>,
    #[serde(rename = "Memorandum", default, skip_serializing_if = "Option::is_none")]
    pub memorandum: Option<NaiveDate>,
    pub activo: bool,
    #[serde(rename = "Permiso", default)]
    pub permiso: Permisos,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl From<Documento<Usuario>> for UsuarioResponse {
    fn from(doc: Documento<Usuario>) -> Self {
        Self {
            id: doc.id,
            nombre: doc.datos.nombre,
            email: doc.datos.email,
            cargo: doc.datos.cargo,
            unidad: doc.datos.unidad,
            memorandum: doc.datos.memorandum,
            activo: doc.datos.activo,
            permiso: doc.datos.permiso,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cargo_accepts_unaccented_alias() {
        let cargo: Cargo = serde_json::from_value(json!("tecnico")).unwrap();
        assert_eq!(cargo, Cargo::Tecnico);
        assert_eq!(serde_json::to_value(cargo).unwrap(), json!("técnico"));
        assert_eq!(Cargo::from_str("admin"), Some(Cargo::Admin));
        assert_eq!(Cargo::from_str("gerente"), None);
    }

    #[test]
    fn test_response_never_carries_password() {
        let doc = Documento {
            id: Uuid::new_v4(),
            datos: Usuario {
                nombre: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                password_hash: "$2b$04$hash".to_string(),
                cargo: Cargo::Encargado,
                unidad: Some("U1".to_string()),
                memorandum: None,
                activo: true,
                permiso: Permisos::default(),
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let valor = serde_json::to_value(UsuarioResponse::from(doc)).unwrap();
        assert!(valor.get("PasswordHash").is_none());
        assert!(valor.get("Password").is_none());
        assert_eq!(valor["Cargo"], "encargado");
    }

    #[test]
    fn test_stored_user_defaults() {
        let usuario: Usuario = serde_json::from_value(json!({
            "Nombre": "Luis",
            "Email": "luis@example.com",
            "PasswordHash": "x",
            "Cargo": "admin"
        }))
        .unwrap();
        assert!(usuario.activo);
        assert_eq!(usuario.permiso, Permisos::default());
    }
}
