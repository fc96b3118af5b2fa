//! Extractores con errores de la API
//!
//! Envuelven `Json` y `Path` de axum para que un cuerpo ilegible o un id
//! mal formado respondan con el mismo JSON que cualquier otro `AppError`.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::utils::errors::AppError;

/// Cuerpo JSON de la request
#[derive(Debug, Clone)]
pub struct CuerpoJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for CuerpoJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(valor) = Json::<T>::from_request(request, state)
            .await
            .map_err(|rechazo| AppError::BadRequest(rechazo.body_text()))?;
        Ok(Self(valor))
    }
}

/// Parámetros de la ruta
#[derive(Debug, Clone)]
pub struct ParamRuta<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ParamRuta<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(valor) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rechazo| AppError::BadRequest(rechazo.body_text()))?;
        Ok(Self(valor))
    }
}
