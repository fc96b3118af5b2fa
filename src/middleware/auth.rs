//! Middleware de autenticación y permisos
//!
//! Cada router de entidad pasa por `permission_gate` con el módulo que
//! protege. Con `ENFORCE_PERMISSIONS=false` la request sigue sin tocarse;
//! si no, se exige un token válido de un usuario activo y un nivel de
//! acceso suficiente para el método HTTP.

use axum::{
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

use crate::{
    controllers::usuario_controller::UsuarioController,
    models::permiso::Modulo,
    services::acceso_service::{accion_para_metodo, evaluar, EstadoAcceso},
    services::jwt_service::extract_bearer,
    state::AppState,
    utils::errors::AppError,
};

/// Puerta de acceso por módulo
pub async fn permission_gate(
    state: AppState,
    modulo: Modulo,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !state.config.enforce_permissions {
        return Ok(next.run(request).await);
    }

    // Extraer token del header Authorization
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|valor| valor.to_str().ok())
        .and_then(extract_bearer)
        .ok_or_else(|| AppError::Unauthorized("Token de autorización requerido".to_string()))?;

    let claims = state.jwt.validate_token(token)?;

    // El usuario tiene que seguir existiendo y estar activo
    let controller = UsuarioController::new(
        state.store.clone(),
        state.jwt.clone(),
        state.config.bcrypt_cost,
    );
    let sesion = controller
        .cargar_sesion(claims.usuario_id()?)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Usuario inactivo o inexistente".to_string()))?;

    let accion = accion_para_metodo(request.method());
    match evaluar(Some(&sesion), modulo, accion) {
        EstadoAcceso::Permitido => {}
        estado => {
            tracing::warn!(
                "🚫 Acceso {} para {} sobre {} ({:?})",
                estado.as_str(),
                sesion.usuario_id,
                modulo,
                accion
            );
            return Err(AppError::Forbidden(format!(
                "Sin permiso para {:?} en {}",
                accion, modulo
            )));
        }
    }

    // Inyectar la sesión en las extensions
    request.extensions_mut().insert(sesion);

    Ok(next.run(request).await)
}
