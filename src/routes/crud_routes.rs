use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use uuid::Uuid;

use crate::controllers::crud_controller::CrudController;
use crate::dto::api_response::DeleteResponse;
use crate::middleware::auth::permission_gate;
use crate::models::entidad::{Documento, Entidad};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{CuerpoJson, ParamRuta};

/// Router CRUD de una entidad, protegido por la puerta de su módulo
pub fn create_crud_router<E: Entidad>(state: AppState) -> Router<AppState> {
    let modulo = E::DESCRIPTOR.modulo;

    Router::new()
        .route("/", get(listar::<E>).post(crear::<E>))
        .route("/:id", get(obtener::<E>).put(actualizar::<E>).delete(eliminar::<E>))
        .route_layer(middleware::from_fn_with_state(
            state,
            move |State(state): State<AppState>, request: Request, next: Next| {
                permission_gate(state, modulo, request, next)
            },
        ))
}

async fn listar<E: Entidad>(State(state): State<AppState>) -> Result<Json<Vec<Documento<E>>>, AppError> {
    let controller = CrudController::<E>::new(state.store.clone());
    Ok(Json(controller.listar().await?))
}

async fn obtener<E: Entidad>(
    State(state): State<AppState>,
    ParamRuta(id): ParamRuta<Uuid>,
) -> Result<Json<Documento<E>>, AppError> {
    let controller = CrudController::<E>::new(state.store.clone());
    Ok(Json(controller.obtener(id).await?))
}

async fn crear<E: Entidad>(
    State(state): State<AppState>,
    CuerpoJson(cuerpo): CuerpoJson<Value>,
) -> Result<(StatusCode, Json<Documento<E>>), AppError> {
    let controller = CrudController::<E>::new(state.store.clone());
    let creado = controller.crear(cuerpo).await?;
    Ok((StatusCode::CREATED, Json(creado)))
}

async fn actualizar<E: Entidad>(
    State(state): State<AppState>,
    ParamRuta(id): ParamRuta<Uuid>,
    CuerpoJson(cuerpo): CuerpoJson<Value>,
) -> Result<Json<Documento<E>>, AppError> {
    let controller = CrudController::<E>::new(state.store.clone());
    Ok(Json(controller.actualizar(id, cuerpo).await?))
}

async fn eliminar<E: Entidad>(
    State(state): State<AppState>,
    ParamRuta(id): ParamRuta<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let controller = CrudController::<E>::new(state.store.clone());
    let eliminado = controller.eliminar(id).await?;

    let message = if eliminado {
        format!("{} eliminado exitosamente", E::DESCRIPTOR.nombre)
    } else {
        format!("{} no existía", E::DESCRIPTOR.nombre)
    };
    Ok(Json(DeleteResponse {
        success: true,
        message,
        eliminado,
    }))
}
