//! Descriptor de entidades
//!
//! Todas las entidades de la flota comparten el mismo ciclo CRUD. Lo único
//! que cambia entre ellas es lo que declara su `Descriptor`: la colección
//! donde se guardan, el módulo de permisos y los campos requeridos.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::permiso::Modulo;
use crate::repositories::document_store::Registro;
use crate::utils::errors::AppError;

/// Metadatos de una entidad
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    /// Nombre para mensajes ("Maquinaria")
    pub nombre: &'static str,
    /// Colección/tabla donde se guardan los documentos
    pub coleccion: &'static str,
    /// Segmento de la ruta bajo `/api`
    pub ruta: &'static str,
    pub modulo: Modulo,
    pub requeridos: &'static [&'static str],
}

/// Entidad persistida como documento plano
pub trait Entidad: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const DESCRIPTOR: Descriptor;
}

/// Documento guardado: id generado, campos de la entidad y marcas de tiempo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Documento<E> {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub datos: E,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl<E: DeserializeOwned> Documento<E> {
    /// Lee un registro de `coleccion`; un registro ilegible es un error interno
    pub fn leer(registro: Registro, coleccion: &str) -> Result<Self, AppError> {
        let datos = serde_json::from_value(registro.datos).map_err(|e| {
            AppError::Internal(format!(
                "Documento {} corrupto en {}: {}",
                registro.id, coleccion, e
            ))
        })?;

        Ok(Self {
            id: registro.id,
            datos,
            created_at: registro.created_at,
            updated_at: registro.updated_at,
        })
    }
}

impl<E: Entidad> Documento<E> {
    pub fn desde_registro(registro: Registro) -> Result<Self, AppError> {
        Self::leer(registro, E::DESCRIPTOR.coleccion)
    }
}

/// Interpreta un cuerpo JSON como entidad. Un valor de tipo incorrecto es un
/// error de validación para el llamador, no un fallo interno.
pub fn leer_entidad<E: Entidad>(cuerpo: Value) -> Result<E, AppError> {
    serde_json::from_value(cuerpo).map_err(|e| {
        AppError::BadRequest(format!("{} validation failed: {}", E::DESCRIPTOR.nombre, e))
    })
}

/// Combina los campos nombrados en `cambios` sobre `actual`
pub fn fusionar(actual: &mut Value, cambios: Value) -> Result<(), AppError> {
    let (Value::Object(destino), Value::Object(origen)) = (actual, cambios) else {
        return Err(AppError::BadRequest("El cuerpo debe ser un objeto JSON".to_string()));
    };

    for (campo, valor) in origen {
        // _id y marcas de tiempo no se sobrescriben
        if matches!(campo.as_str(), "_id" | "createdAt" | "updatedAt") {
            continue;
        }
        destino.insert(campo, valor);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fusionar_replaces_named_fields_only() {
        let mut actual = json!({"detalle": "Tractor", "placa": "ABC123", "unidad": "U1"});
        fusionar(&mut actual, json!({"placa": "XYZ789", "_id": "otro"})).unwrap();

        assert_eq!(actual, json!({"detalle": "Tractor", "placa": "XYZ789", "unidad": "U1"}));
    }

    #[test]
    fn test_fusionar_rejects_non_object() {
        let mut actual = json!({"detalle": "Tractor"});
        assert!(fusionar(&mut actual, json!(["placa"])).is_err());
    }
}
