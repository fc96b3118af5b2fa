use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    routing::{get, patch, post, put},
    Extension, Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::controllers::usuario_controller::UsuarioController;
use crate::dto::api_response::{ApiResponse, DeleteResponse};
use crate::dto::auth_dto::{
    ActualizarUsuarioRequest, EstadoRequest, InterruptorRequest, LoginRequest, LoginResponse,
    RegistroRequest,
};
use crate::middleware::auth::permission_gate;
use crate::models::permiso::{Modulo, NivelAcceso, Permisos};
use crate::models::usuario::UsuarioResponse;
use crate::services::acceso_service::{exigir_admin, Sesion};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::extractors::{CuerpoJson, ParamRuta};

/// Rutas de usuarios: registro y login son públicos, el resto pasa por la
/// puerta del módulo `usuarios`
pub fn create_usuario_router(state: AppState) -> Router<AppState> {
    let protegidas = Router::new()
        .route("/", get(listar_usuarios))
        .route("/modulos", get(listar_modulos))
        .route(
            "/:id",
            get(obtener_usuario).put(actualizar_usuario).delete(eliminar_usuario),
        )
        .route("/:id/activo", patch(cambiar_estado))
        .route("/:id/permisos", put(reemplazar_permisos))
        .route("/:id/permisos/:modulo", patch(alternar_permiso))
        .route_layer(middleware::from_fn_with_state(
            state,
            |State(state): State<AppState>, request: Request, next: Next| {
                permission_gate(state, Modulo::Usuarios, request, next)
            },
        ));

    Router::new()
        .route("/registro", post(registrar))
        .route("/login", post(login))
        .merge(protegidas)
}

fn controller(state: &AppState) -> UsuarioController {
    UsuarioController::new(state.store.clone(), state.jwt.clone(), state.config.bcrypt_cost)
}

async fn registrar(
    State(state): State<AppState>,
    CuerpoJson(request): CuerpoJson<RegistroRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UsuarioResponse>>), AppError> {
    let usuario = controller(&state).registrar(request, state.captcha.as_ref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(
            usuario,
            "Usuario registrado exitosamente".to_string(),
        )),
    ))
}

async fn login(
    State(state): State<AppState>,
    CuerpoJson(request): CuerpoJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    Ok(Json(controller(&state).login(request).await?))
}

async fn listar_usuarios(State(state): State<AppState>) -> Result<Json<Vec<UsuarioResponse>>, AppError> {
    Ok(Json(controller(&state).listar().await?))
}

/// Módulos que admite el editor de permisos
async fn listar_modulos() -> Json<Vec<Modulo>> {
    Json(Modulo::TODOS.to_vec())
}

async fn obtener_usuario(
    State(state): State<AppState>,
    ParamRuta(id): ParamRuta<Uuid>,
) -> Result<Json<UsuarioResponse>, AppError> {
    Ok(Json(controller(&state).obtener(id).await?))
}

async fn actualizar_usuario(
    State(state): State<AppState>,
    sesion: Option<Extension<Sesion>>,
    ParamRuta(id): ParamRuta<Uuid>,
    CuerpoJson(request): CuerpoJson<ActualizarUsuarioRequest>,
) -> Result<Json<UsuarioResponse>, AppError> {
    if request.cargo.is_some() && state.config.enforce_permissions {
        exigir_admin(sesion.as_ref().map(|Extension(s)| s))?;
    }
    Ok(Json(controller(&state).actualizar(id, request).await?))
}

async fn eliminar_usuario(
    State(state): State<AppState>,
    ParamRuta(id): ParamRuta<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let eliminado = controller(&state).eliminar(id).await?;
    let message = if eliminado {
        "Usuario eliminado exitosamente"
    } else {
        "Usuario no existía"
    };
    Ok(Json(DeleteResponse {
        success: true,
        message: message.to_string(),
        eliminado,
    }))
}

async fn cambiar_estado(
    State(state): State<AppState>,
    ParamRuta(id): ParamRuta<Uuid>,
    CuerpoJson(request): CuerpoJson<EstadoRequest>,
) -> Result<Json<UsuarioResponse>, AppError> {
    Ok(Json(controller(&state).cambiar_estado(id, request.activo).await?))
}

async fn reemplazar_permisos(
    State(state): State<AppState>,
    ParamRuta(id): ParamRuta<Uuid>,
    CuerpoJson(permisos): CuerpoJson<Permisos>,
) -> Result<Json<UsuarioResponse>, AppError> {
    Ok(Json(controller(&state).reemplazar_permisos(id, permisos).await?))
}

#[derive(Debug, Serialize)]
struct AlternarResponse {
    modulo: Modulo,
    nivel: NivelAcceso,
    usuario: UsuarioResponse,
}

async fn alternar_permiso(
    State(state): State<AppState>,
    ParamRuta((id, modulo)): ParamRuta<(Uuid, Modulo)>,
    CuerpoJson(request): CuerpoJson<InterruptorRequest>,
) -> Result<Json<AlternarResponse>, AppError> {
    let (nivel, usuario) = controller(&state)
        .alternar_permiso(id, modulo, request.interruptor)
        .await?;
    Ok(Json(AlternarResponse {
        modulo,
        nivel,
        usuario,
    }))
}
