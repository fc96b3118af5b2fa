//! Modelo de Maquinaria
//!
//! Entidad raíz de la flota. Las demás entidades la referencian por id.

use serde::{Deserialize, Serialize};

use crate::models::campos;
use crate::models::entidad::{Descriptor, Entidad};
use crate::models::permiso::Modulo;

/// Maquinaria - una pieza de equipo registrada
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Maquinaria {
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub detalle: Option<String>,
    /// Única en la práctica, no se impone
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub placa: Option<String>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub unidad: Option<String>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub marca: Option<String>,
    #[serde(default, deserialize_with = "campos::texto::deserialize", skip_serializing_if = "Option::is_none")]
    pub modelo: Option<String>,
}

impl Entidad for Maquinaria {
    const DESCRIPTOR: Descriptor = Descriptor {
        nombre: "Maquinaria",
        coleccion: "maquinaria",
        ruta: "maquinaria",
        modulo: Modulo::Maquinaria,
        requeridos: &["detalle", "placa", "unidad"],
    };
}
