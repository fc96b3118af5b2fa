use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repositories::document_store::{DocumentStore, Registro};
use crate::utils::errors::AppError;

/// Almacén sobre PostgreSQL: una tabla JSONB por colección.
///
/// Los nombres de tabla salen siempre de los descriptores estáticos de las
/// entidades, nunca de la entrada del usuario.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PostgresStore {
    async fn preparar(&self, colecciones: &[&'static str]) -> Result<(), AppError> {
        for coleccion in colecciones {
            sqlx::query(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {coleccion} (
                    id UUID PRIMARY KEY,
                    datos JSONB NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL,
                    updated_at TIMESTAMPTZ NOT NULL
                )
                "#
            ))
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Error creating table {}: {}", coleccion, e)))?;

            log::debug!("📦 Colección '{}' lista", coleccion);
        }
        Ok(())
    }

    async fn listar(&self, coleccion: &'static str) -> Result<Vec<Registro>, AppError> {
        let registros = sqlx::query_as::<_, Registro>(&format!(
            "SELECT id, datos, created_at, updated_at FROM {coleccion} ORDER BY created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(registros)
    }

    async fn buscar(&self, coleccion: &'static str, id: Uuid) -> Result<Option<Registro>, AppError> {
        let registro = sqlx::query_as::<_, Registro>(&format!(
            "SELECT id, datos, created_at, updated_at FROM {coleccion} WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(registro)
    }

    async fn buscar_por_campo(
        &self,
        coleccion: &'static str,
        campo: &str,
        valor: &str,
    ) -> Result<Vec<Registro>, AppError> {
        let registros = sqlx::query_as::<_, Registro>(&format!(
            "SELECT id, datos, created_at, updated_at FROM {coleccion} WHERE datos ->> $1 = $2 ORDER BY created_at ASC"
        ))
        .bind(campo)
        .bind(valor)
        .fetch_all(&self.pool)
        .await?;

        Ok(registros)
    }

    async fn insertar(&self, coleccion: &'static str, datos: Value) -> Result<Registro, AppError> {
        let nuevo = Registro::nuevo(datos);

        let registro = sqlx::query_as::<_, Registro>(&format!(
            r#"
            INSERT INTO {coleccion} (id, datos, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, datos, created_at, updated_at
            "#
        ))
        .bind(nuevo.id)
        .bind(&nuevo.datos)
        .bind(nuevo.created_at)
        .bind(nuevo.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(registro)
    }

    async fn reemplazar(
        &self,
        coleccion: &'static str,
        id: Uuid,
        datos: Value,
    ) -> Result<Option<Registro>, AppError> {
        let registro = sqlx::query_as::<_, Registro>(&format!(
            r#"
            UPDATE {coleccion}
            SET datos = $2, updated_at = $3
            WHERE id = $1
            RETURNING id, datos, created_at, updated_at
            "#
        ))
        .bind(id)
        .bind(&datos)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(registro)
    }

    async fn eliminar(&self, coleccion: &'static str, id: Uuid) -> Result<bool, AppError> {
        let resultado = sqlx::query(&format!("DELETE FROM {coleccion} WHERE id = $1"))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(resultado.rows_affected() > 0)
    }
}
