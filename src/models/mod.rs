//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos: una entidad por colección
//! más el modelo de permisos por módulo.

pub mod campos;
pub mod entidad;
pub mod permiso;
pub mod maquinaria;
pub mod asignacion;
pub mod control;
pub mod mantenimiento;
pub mod seguro;
pub mod soat;
pub mod impuesto;
pub mod usuario;

pub use entidad::{Descriptor, Documento, Entidad};
pub use permiso::{Accion, Interruptor, Modulo, NivelAcceso, Permisos};
pub use maquinaria::Maquinaria;
pub use asignacion::Asignacion;
pub use control::Control;
pub use mantenimiento::Mantenimiento;
pub use seguro::Seguro;
pub use soat::Soat;
pub use impuesto::Impuesto;
pub use usuario::{Cargo, Usuario, UsuarioResponse};
