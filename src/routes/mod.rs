//! Rutas de la API
//!
//! Un router CRUD por entidad bajo `/api/<ruta>`, el de usuarios bajo
//! `/api/usuarios` y el health check.

pub mod crud_routes;
pub mod usuario_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::models::entidad::Entidad;
use crate::models::{Asignacion, Control, Impuesto, Mantenimiento, Maquinaria, Seguro, Soat, Usuario};
use crate::state::AppState;
use crud_routes::create_crud_router;
use usuario_routes::create_usuario_router;

/// Router completo de la API
pub fn create_api_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest(&ruta::<Maquinaria>(), create_crud_router::<Maquinaria>(state.clone()))
        .nest(&ruta::<Asignacion>(), create_crud_router::<Asignacion>(state.clone()))
        .nest(&ruta::<Control>(), create_crud_router::<Control>(state.clone()))
        .nest(&ruta::<Mantenimiento>(), create_crud_router::<Mantenimiento>(state.clone()))
        .nest(&ruta::<Seguro>(), create_crud_router::<Seguro>(state.clone()))
        .nest(&ruta::<Soat>(), create_crud_router::<Soat>(state.clone()))
        .nest(&ruta::<Impuesto>(), create_crud_router::<Impuesto>(state.clone()))
        .nest(&format!("/api/{}", Usuario::RUTA), create_usuario_router(state))
}

fn ruta<E: Entidad>() -> String {
    format!("/api/{}", E::DESCRIPTOR.ruta)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
