//! Modelo de Seguro

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::campos;
use crate::models::entidad::{Descriptor, Entidad};
use crate::models::permiso::Modulo;

/// Póliza de seguro de una maquinaria
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seguro {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maquinaria: Option<Uuid>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub numero_poliza: Option<String>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub aseguradora: Option<String>,
    #[serde(default, deserialize_with = "campos::fecha::deserialize", skip_serializing_if = "Option::is_none")]
    pub fecha_inicio: Option<NaiveDate>,
    #[serde(default, deserialize_with = "campos::fecha::deserialize", skip_serializing_if = "Option::is_none")]
    pub fecha_fin: Option<NaiveDate>,
    #[serde(default, with = "rust_decimal::serde::float_option", skip_serializing_if = "Option::is_none")]
    pub importe: Option<Decimal>,
}

impl Entidad for Seguro {
    const DESCRIPTOR: Descriptor = Descriptor {
        nombre: "Seguro",
        coleccion: "seguros",
        ruta: "seguro",
        modulo: Modulo::Seguro,
        requeridos: &["maquinaria", "numeroPoliza", "aseguradora", "fechaInicio", "fechaFin"],
    };
}
