//! Modelo de Asignación
//!
//! Vincula una maquinaria con un encargado durante una gestión. Una
//! maquinaria puede tener varias asignaciones; no se controla el solapamiento.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::campos;
use crate::models::entidad::{Descriptor, Entidad};
use crate::models::permiso::Modulo;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asignacion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maquinaria: Option<Uuid>,
    #[serde(default, deserialize_with = "campos::fecha::deserialize", skip_serializing_if = "Option::is_none")]
    pub fecha_asignacion: Option<NaiveDate>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub gestion: Option<String>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub encargado: Option<String>,
}

impl Entidad for Asignacion {
    const DESCRIPTOR: Descriptor = Descriptor {
        nombre: "Asignacion",
        coleccion: "asignaciones",
        ruta: "asignacion",
        modulo: Modulo::Asignacion,
        requeridos: &["maquinaria", "fechaAsignacion", "gestion", "encargado"],
    };
}
