//! Modelo de permisos por módulo
//!
//! Cada usuario tiene un nivel de acceso por módulo. En el cable se mantiene
//! la forma `{ver, editar, eliminar}` que consume el frontend, donde
//! `eliminar = true` marca el módulo como denegado.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Módulos de la aplicación que admiten permisos
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modulo {
    Maquinaria,
    Asignacion,
    Control,
    Mantenimiento,
    Seguro,
    Soat,
    Impuesto,
    Usuarios,
}

impl Modulo {
    pub const TODOS: [Modulo; 8] = [
        Modulo::Maquinaria,
        Modulo::Asignacion,
        Modulo::Control,
        Modulo::Mantenimiento,
        Modulo::Seguro,
        Modulo::Soat,
        Modulo::Impuesto,
        Modulo::Usuarios,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Modulo::Maquinaria => "maquinaria",
            Modulo::Asignacion => "asignacion",
            Modulo::Control => "control",
            Modulo::Mantenimiento => "mantenimiento",
            Modulo::Seguro => "seguro",
            Modulo::Soat => "soat",
            Modulo::Impuesto => "impuesto",
            Modulo::Usuarios => "usuarios",
        }
    }
}

impl fmt::Display for Modulo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Modulo {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modulo::TODOS
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("Módulo desconocido: {}", s))
    }
}

/// Acción que se intenta sobre un módulo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accion {
    Ver,
    Editar,
    Eliminar,
}

/// Nivel de acceso de un usuario sobre un módulo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "FlagsPermiso", into = "FlagsPermiso")]
pub enum NivelAcceso {
    /// Solo lectura
    #[default]
    Ver,
    /// Lectura y escritura
    Editar,
    /// Sin acceso
    Denegado,
}

impl NivelAcceso {
    pub fn permite(&self, accion: Accion) -> bool {
        match self {
            NivelAcceso::Denegado => false,
            NivelAcceso::Ver => accion == Accion::Ver,
            NivelAcceso::Editar => true,
        }
    }
}

/// Forma en el cable de un permiso
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagsPermiso {
    #[serde(default = "verdadero")]
    pub ver: bool,
    #[serde(default)]
    pub editar: bool,
    #[serde(default)]
    pub eliminar: bool,
}

fn verdadero() -> bool {
    true
}

impl From<FlagsPermiso> for NivelAcceso {
    fn from(flags: FlagsPermiso) -> Self {
        // eliminar gana: es la marca de denegación
        if flags.eliminar {
            NivelAcceso::Denegado
        } else if flags.editar {
            NivelAcceso::Editar
        } else {
            NivelAcceso::Ver
        }
    }
}

impl From<NivelAcceso> for FlagsPermiso {
    fn from(nivel: NivelAcceso) -> Self {
        FlagsPermiso {
            ver: true,
            editar: nivel == NivelAcceso::Editar,
            eliminar: nivel == NivelAcceso::Denegado,
        }
    }
}

/// Los dos interruptores del editor de permisos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interruptor {
    Habilitar,
    Denegar,
}

/// Permisos de un usuario: módulo → nivel. Un módulo ausente vale `Ver`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permisos(BTreeMap<Modulo, NivelAcceso>);

impl Permisos {
    pub fn nivel(&self, modulo: Modulo) -> NivelAcceso {
        self.0.get(&modulo).copied().unwrap_or_default()
    }

    pub fn asignar(&mut self, modulo: Modulo, nivel: NivelAcceso) {
        self.0.insert(modulo, nivel);
    }

    /// Acciona un interruptor. Encender uno apaga el otro; accionar el que
    /// ya está encendido vuelve el módulo a solo lectura.
    pub fn alternar(&mut self, modulo: Modulo, interruptor: Interruptor) -> NivelAcceso {
        let actual = self.nivel(modulo);
        let nuevo = match (interruptor, actual) {
            (Interruptor::Habilitar, NivelAcceso::Editar) => NivelAcceso::Ver,
            (Interruptor::Habilitar, _) => NivelAcceso::Editar,
            (Interruptor::Denegar, NivelAcceso::Denegado) => NivelAcceso::Ver,
            (Interruptor::Denegar, _) => NivelAcceso::Denegado,
        };
        self.asignar(modulo, nuevo);
        nuevo
    }

    pub fn permite(&self, modulo: Modulo, accion: Accion) -> bool {
        self.nivel(modulo).permite(accion)
    }

    /// Vista completa para el editor: todos los módulos, incluidos los implícitos
    pub fn completos(&self) -> Vec<(Modulo, NivelAcceso)> {
        Modulo::TODOS.into_iter().map(|m| (m, self.nivel(m))).collect()
    }
}
