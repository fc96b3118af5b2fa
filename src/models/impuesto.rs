//! Modelo de Impuesto

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::campos;
use crate::models::entidad::{Descriptor, Entidad};
use crate::models::permiso::Modulo;

/// Pago de impuestos de una maquinaria en una gestión
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Impuesto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maquinaria: Option<Uuid>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub gestion: Option<String>,
    #[serde(default, deserialize_with = "campos::fecha::deserialize", skip_serializing_if = "Option::is_none")]
    pub fecha_pago: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub importe: Option<Decimal>,
}

impl Entidad for Impuesto {
    const DESCRIPTOR: Descriptor = Descriptor {
        nombre: "Impuesto",
        coleccion: "impuestos",
        ruta: "impuesto",
        modulo: Modulo::Impuesto,
        requeridos: &["maquinaria", "gestion", "fechaPago"],
    };
}
