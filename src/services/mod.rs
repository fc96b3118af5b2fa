//! Services module
//!
//! Este módulo contiene la lógica que no pertenece a un único recurso:
//! tokens JWT, verificación de CAPTCHA y la puerta de acceso por módulo.

pub mod acceso_service;
pub mod captcha_service;
pub mod jwt_service;

pub use acceso_service::{evaluar, EstadoAcceso, Sesion};
pub use captcha_service::VerificadorCaptcha;
pub use jwt_service::JwtService;
