//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos.
//! La comprobación de campos requeridos es la misma en el servidor y en
//! el cliente: ambos parten del descriptor de la entidad.

use serde_json::Value;
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors};

pub const MENSAJE_REQUERIDO: &str = "es requerido";

/// Un campo cuenta como presente si existe, no es null y, si es texto, no está en blanco
pub fn campo_presente(valor: Option<&Value>) -> bool {
    match valor {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// Campos requeridos ausentes en el documento, en el orden del descriptor
pub fn campos_faltantes(documento: &Value, requeridos: &'static [&'static str]) -> Vec<&'static str> {
    requeridos
        .iter()
        .copied()
        .filter(|campo| !campo_presente(documento.get(*campo)))
        .collect()
}

/// Validar la presencia de todos los campos requeridos
pub fn validate_requeridos(
    documento: &Value,
    requeridos: &'static [&'static str],
) -> Result<(), ValidationErrors> {
    let faltantes = campos_faltantes(documento, requeridos);
    if faltantes.is_empty() {
        return Ok(());
    }

    let mut errors = ValidationErrors::new();
    for campo in faltantes {
        let mut error = ValidationError::new("required");
        error.message = Some(MENSAJE_REQUERIDO.into());
        error.add_param("field".into(), &campo);
        errors.add(campo, error);
    }
    Err(errors)
}

/// Mapa campo → mensaje, la forma en que un formulario muestra los errores
pub fn errores_formulario(
    documento: &Value,
    requeridos: &'static [&'static str],
) -> BTreeMap<String, String> {
    campos_faltantes(documento, requeridos)
        .into_iter()
        .map(|campo| (campo.to_string(), MENSAJE_REQUERIDO.to_string()))
        .collect()
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.message = Some(MENSAJE_REQUERIDO.into());
        return Err(error);
    }
    Ok(())
}
