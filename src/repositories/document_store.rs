use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Fila de cualquier colección: id, documento JSON y marcas de tiempo
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Registro {
    pub id: Uuid,
    pub datos: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Registro {
    pub fn nuevo(datos: Value) -> Self {
        let ahora = Utc::now();
        Self {
            id: Uuid::new_v4(),
            datos,
            created_at: ahora,
            updated_at: ahora,
        }
    }
}

/// Almacén de documentos, una colección por entidad.
///
/// Las colecciones son independientes: no hay cascadas ni transacciones
/// entre ellas, y un `reemplazar` concurrente gana el último en escribir.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Crea las colecciones que falten
    async fn preparar(&self, colecciones: &[&'static str]) -> Result<(), AppError>;

    /// Todos los documentos, en orden de creación
    async fn listar(&self, coleccion: &'static str) -> Result<Vec<Registro>, AppError>;

    async fn buscar(&self, coleccion: &'static str, id: Uuid) -> Result<Option<Registro>, AppError>;

    /// Documentos cuyo campo de texto `campo` es exactamente `valor`
    async fn buscar_por_campo(
        &self,
        coleccion: &'static str,
        campo: &str,
        valor: &str,
    ) -> Result<Vec<Registro>, AppError>;

    async fn insertar(&self, coleccion: &'static str, datos: Value) -> Result<Registro, AppError>;

    /// Reemplaza el documento si existe; nunca inserta
    async fn reemplazar(
        &self,
        coleccion: &'static str,
        id: Uuid,
        datos: Value,
    ) -> Result<Option<Registro>, AppError>;

    /// `true` si había un documento con ese id
    async fn eliminar(&self, coleccion: &'static str, id: Uuid) -> Result<bool, AppError>;
}
