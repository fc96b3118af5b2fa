//! Modelo de Mantenimiento

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::campos;
use crate::models::entidad::{Descriptor, Entidad};
use crate::models::permiso::Modulo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mantenimiento {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maquinaria: Option<Uuid>,
    /// preventivo, correctivo...
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "campos::fecha::deserialize", skip_serializing_if = "Option::is_none")]
    pub fecha: Option<NaiveDate>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub costo: Option<Decimal>,
}

impl Entidad for Mantenimiento {
    const DESCRIPTOR: Descriptor = Descriptor {
        nombre: "Mantenimiento",
        coleccion: "mantenimientos",
        ruta: "mantenimiento",
        modulo: Modulo::Mantenimiento,
        requeridos: &["maquinaria", "tipo", "fecha"],
    };
}
