//! Modelo de Control (bitácora de inspección de una maquinaria)

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::campos;
use crate::models::entidad::{Descriptor, Entidad};
use crate::models::permiso::Modulo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Control {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maquinaria: Option<Uuid>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub ubicacion: Option<String>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub gerente: Option<String>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub encargado: Option<String>,
    #[serde(default, deserialize_with = "campos::fecha::deserialize", skip_serializing_if = "Option::is_none")]
    pub fecha: Option<NaiveDate>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub observaciones: Option<String>,
}

impl Entidad for Control {
    const DESCRIPTOR: Descriptor = Descriptor {
        nombre: "Control",
        coleccion: "controles",
        ruta: "control",
        modulo: Modulo::Control,
        requeridos: &["maquinaria", "estado", "ubicacion", "gerente", "encargado", "fecha"],
    };
}
