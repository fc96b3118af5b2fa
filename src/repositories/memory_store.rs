use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repositories::document_store::{DocumentStore, Registro};
use crate::utils::errors::AppError;

/// Almacén en memoria. Se pierde al reiniciar.
#[derive(Clone, Default)]
pub struct MemoryStore {
    colecciones: Arc<RwLock<HashMap<&'static str, Vec<Registro>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn preparar(&self, colecciones: &[&'static str]) -> Result<(), AppError> {
        let mut mapa = self.colecciones.write().await;
        for coleccion in colecciones {
            mapa.entry(*coleccion).or_default();
        }
        Ok(())
    }

    async fn listar(&self, coleccion: &'static str) -> Result<Vec<Registro>, AppError> {
        let mapa = self.colecciones.read().await;
        Ok(mapa.get(coleccion).cloned().unwrap_or_default())
    }

    async fn buscar(&self, coleccion: &'static str, id: Uuid) -> Result<Option<Registro>, AppError> {
        let mapa = self.colecciones.read().await;
        Ok(mapa
            .get(coleccion)
            .and_then(|docs| docs.iter().find(|r| r.id == id).cloned()))
    }

    async fn buscar_por_campo(
        &self,
        coleccion: &'static str,
        campo: &str,
        valor: &str,
    ) -> Result<Vec<Registro>, AppError> {
        let mapa = self.colecciones.read().await;
        Ok(mapa
            .get(coleccion)
            .map(|docs| {
                docs.iter()
                    .filter(|r| r.datos.get(campo).and_then(Value::as_str) == Some(valor))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insertar(&self, coleccion: &'static str, datos: Value) -> Result<Registro, AppError> {
        let registro = Registro::nuevo(datos);
        let mut mapa = self.colecciones.write().await;
        mapa.entry(coleccion).or_default().push(registro.clone());
        Ok(registro)
    }

    async fn reemplazar(
        &self,
        coleccion: &'static str,
        id: Uuid,
        datos: Value,
    ) -> Result<Option<Registro>, AppError> {
        let mut mapa = self.colecciones.write().await;
        let Some(registro) = mapa
            .get_mut(coleccion)
            .and_then(|docs| docs.iter_mut().find(|r| r.id == id))
        else {
            return Ok(None);
        };

        registro.datos = datos;
        registro.updated_at = Utc::now();
        Ok(Some(registro.clone()))
    }

    async fn eliminar(&self, coleccion: &'static str, id: Uuid) -> Result<bool, AppError> {
        let mut mapa = self.colecciones.write().await;
        let Some(docs) = mapa.get_mut(coleccion) else {
            return Ok(false);
        };

        let antes = docs.len();
        docs.retain(|r| r.id != id);
        Ok(docs.len() < antes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_insert_list_replace_delete() {
        let store = MemoryStore::new();
        let creado = store
            .insertar("maquinaria", json!({"detalle": "Tractor"}))
            .await
            .unwrap();

        let todos = store.listar("maquinaria").await.unwrap();
        assert_eq!(todos, vec![creado.clone()]);

        let actualizado = store
            .reemplazar("maquinaria", creado.id, json!({"detalle": "Grúa"}))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(actualizado.datos["detalle"], "Grúa");
        assert_eq!(actualizado.created_at, creado.created_at);

        assert!(store.eliminar("maquinaria", creado.id).await.unwrap());
        assert!(!store.eliminar("maquinaria", creado.id).await.unwrap());
        assert!(store.listar("maquinaria").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_missing_does_not_insert() {
        let store = MemoryStore::new();
        let resultado = store
            .reemplazar("seguros", Uuid::new_v4(), json!({"aseguradora": "X"}))
            .await
            .unwrap();
        assert!(resultado.is_none());
        assert!(store.listar("seguros").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let store = MemoryStore::new();
        store.insertar("maquinaria", json!({"placa": "ABC123"})).await.unwrap();
        store.preparar(&["controles"]).await.unwrap();

        assert!(store.listar("controles").await.unwrap().is_empty());
        assert_eq!(
            store.buscar_por_campo("maquinaria", "placa", "ABC123").await.unwrap().len(),
            1
        );
        assert!(store.buscar_por_campo("maquinaria", "placa", "abc123").await.unwrap().is_empty());
    }
}
