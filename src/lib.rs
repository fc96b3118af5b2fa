//! Gestión de maquinaria
//!
//! API REST para el inventario de maquinaria de una flota y sus registros
//! asociados (asignaciones, controles, mantenimientos, seguros, SOAT e
//! impuestos), con cuentas de usuario y permisos por módulo. El módulo
//! `client` expone la misma API del lado del consumidor.

pub mod client;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::models::entidad::Entidad;
use crate::models::{Asignacion, Control, Impuesto, Mantenimiento, Maquinaria, Seguro, Soat, Usuario};
use crate::state::AppState;

/// Colecciones que el almacén tiene que preparar al arrancar
pub fn colecciones() -> Vec<&'static str> {
    vec![
        Maquinaria::DESCRIPTOR.coleccion,
        Asignacion::DESCRIPTOR.coleccion,
        Control::DESCRIPTOR.coleccion,
        Mantenimiento::DESCRIPTOR.coleccion,
        Seguro::DESCRIPTOR.coleccion,
        Soat::DESCRIPTOR.coleccion,
        Impuesto::DESCRIPTOR.coleccion,
        Usuario::COLECCION,
    ]
}

/// Aplicación completa con CORS y trazas
pub fn create_app(state: AppState) -> Router {
    let cors = middleware::cors::cors_desde_config(&state.config);

    routes::create_api_router(state.clone())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
