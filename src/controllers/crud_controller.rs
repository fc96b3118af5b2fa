use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::entidad::{fusionar, leer_entidad, Documento, Entidad};
use crate::repositories::DocumentStore;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::validate_requeridos;

/// CRUD genérico: el mismo flujo para cada entidad, parametrizado por su descriptor
pub struct CrudController<E: Entidad> {
    store: Arc<dyn DocumentStore>,
    _entidad: PhantomData<E>,
}

impl<E: Entidad> CrudController<E> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entidad: PhantomData,
        }
    }

    pub async fn listar(&self) -> AppResult<Vec<Documento<E>>> {
        let registros = self.store.listar(E::DESCRIPTOR.coleccion).await?;
        registros.into_iter().map(Documento::desde_registro).collect()
    }

    pub async fn obtener(&self, id: Uuid) -> AppResult<Documento<E>> {
        let registro = self
            .store
            .buscar(E::DESCRIPTOR.coleccion, id)
            .await?
            .ok_or_else(|| not_found_error(E::DESCRIPTOR.nombre, &id.to_string()))?;

        Documento::desde_registro(registro)
    }

    pub async fn crear(&self, cuerpo: Value) -> AppResult<Documento<E>> {
        let datos = normalizar::<E>(cuerpo)?;
        let registro = self.store.insertar(E::DESCRIPTOR.coleccion, datos).await?;

        tracing::info!("✅ {} creado: {}", E::DESCRIPTOR.nombre, registro.id);
        Documento::desde_registro(registro)
    }

    /// Sustituye los campos nombrados en `cuerpo`; nunca inserta
    pub async fn actualizar(&self, id: Uuid, cuerpo: Value) -> AppResult<Documento<E>> {
        let mut actual = self
            .store
            .buscar(E::DESCRIPTOR.coleccion, id)
            .await?
            .ok_or_else(|| not_found_error(E::DESCRIPTOR.nombre, &id.to_string()))?
            .datos;

        fusionar(&mut actual, cuerpo)?;
        let datos = normalizar::<E>(actual)?;

        let registro = self
            .store
            .reemplazar(E::DESCRIPTOR.coleccion, id, datos)
            .await?
            .ok_or_else(|| not_found_error(E::DESCRIPTOR.nombre, &id.to_string()))?;

        tracing::info!("✏️ {} actualizado: {}", E::DESCRIPTOR.nombre, id);
        Documento::desde_registro(registro)
    }

    /// `false` si no existía; no es un error para el llamador
    pub async fn eliminar(&self, id: Uuid) -> AppResult<bool> {
        let eliminado = self.store.eliminar(E::DESCRIPTOR.coleccion, id).await?;

        if eliminado {
            tracing::info!("🗑️ {} eliminado: {}", E::DESCRIPTOR.nombre, id);
        } else {
            tracing::debug!("🗑️ {} {} no existía", E::DESCRIPTOR.nombre, id);
        }
        Ok(eliminado)
    }
}

/// Valida requeridos y tipos, y devuelve el documento tal como se guarda
fn normalizar<E: Entidad>(cuerpo: Value) -> AppResult<Value> {
    if !cuerpo.is_object() {
        return Err(AppError::BadRequest("El cuerpo debe ser un objeto JSON".to_string()));
    }
    validate_requeridos(&cuerpo, E::DESCRIPTOR.requeridos)?;

    let entidad: E = leer_entidad(cuerpo)?;
    serde_json::to_value(&entidad).map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Asignacion, Maquinaria};
    use crate::repositories::MemoryStore;
    use serde_json::json;

    fn controller<E: Entidad>() -> CrudController<E> {
        CrudController::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let ctrl = controller::<Maquinaria>();
        let creado = ctrl
            .crear(json!({"detalle": "Tractor", "placa": "ABC123", "unidad": "U1"}))
            .await
            .unwrap();

        assert_eq!(creado.datos.placa.as_deref(), Some("ABC123"));
        let lista = ctrl.listar().await.unwrap();
        assert_eq!(lista.len(), 1);
        assert_eq!(lista[0].id, creado.id);
    }

    #[tokio::test]
    async fn test_missing_required_field_inserts_nothing() {
        let ctrl = controller::<Maquinaria>();
        let error = ctrl
            .crear(json!({"detalle": "Tractor", "unidad": "U1"}))
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::Validation(_)));
        assert!(ctrl.listar().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_wrong_type_is_bad_request() {
        let ctrl = controller::<Asignacion>();
        let error = ctrl
            .crear(json!({
                "maquinaria": Uuid::new_v4(),
                "fechaAsignacion": "15/01/2024",
                "gestion": "2024",
                "encargado": "Juan"
            }))
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_update_merges_and_revalidates() {
        let ctrl = controller::<Maquinaria>();
        let creado = ctrl
            .crear(json!({"detalle": "Tractor", "placa": "ABC123", "unidad": "U1"}))
            .await
            .unwrap();

        let actualizado = ctrl.actualizar(creado.id, json!({"marca": "John Deere"})).await.unwrap();
        assert_eq!(actualizado.datos.marca.as_deref(), Some("John Deere"));
        assert_eq!(actualizado.datos.placa.as_deref(), Some("ABC123"));

        let error = ctrl.actualizar(creado.id, json!({"placa": ""})).await.unwrap_err();
        assert!(matches!(error, AppError::Validation(_)));
        assert_eq!(ctrl.obtener(creado.id).await.unwrap().datos.placa.as_deref(), Some("ABC123"));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found_and_not_created() {
        let ctrl = controller::<Maquinaria>();
        let error = ctrl
            .actualizar(
                Uuid::new_v4(),
                json!({"detalle": "Tractor", "placa": "ABC123", "unidad": "U1"}),
            )
            .await
            .unwrap_err();

        assert!(matches!(error, AppError::NotFound(_)));
        assert!(ctrl.listar().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_an_error() {
        let ctrl = controller::<Maquinaria>();
        assert!(!ctrl.eliminar(Uuid::new_v4()).await.unwrap());
    }
}
