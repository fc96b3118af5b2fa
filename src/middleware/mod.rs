//! Middleware del sistema
//!
//! Puerta de permisos por módulo y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
