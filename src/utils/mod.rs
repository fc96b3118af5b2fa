//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, extractores y validación.

pub mod errors;
pub mod extractors;
pub mod validation;
