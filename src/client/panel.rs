//! Panel de una entidad
//!
//! Estado local de una pantalla de listado + formulario: los documentos,
//! el indicador de carga, los errores por campo y la notificación (toast)
//! de la última acción. Cada mutación exitosa vuelve a pedir la lista
//! completa.

use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::client::api_client::{ApiClient, ClienteError};
use crate::models::entidad::{Documento, Entidad};
use crate::utils::validation::errores_formulario;

/// Toast de la última acción
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notificacion {
    Exito(String),
    Error(String),
}

pub struct PanelEntidad<E: Entidad> {
    api: ApiClient,
    pub items: Vec<Documento<E>>,
    pub cargando: bool,
    pub errores: BTreeMap<String, String>,
    pub notificacion: Option<Notificacion>,
    /// Documento en edición; `None` = el formulario crea
    pub editando: Option<Uuid>,
}

impl<E: Entidad> PanelEntidad<E> {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            items: Vec::new(),
            cargando: false,
            errores: BTreeMap::new(),
            notificacion: None,
            editando: None,
        }
    }

    /// Carga inicial de la lista
    pub async fn montar(&mut self) {
        self.recargar().await;
    }

    async fn recargar(&mut self) {
        self.cargando = true;
        match self.api.listar::<E>().await {
            Ok(items) => self.items = items,
            Err(e) => self.fallo("cargar", e),
        }
        self.cargando = false;
    }

    /// Errores por campo; `true` si el formulario se puede enviar
    pub fn validar(&mut self, formulario: &Value) -> bool {
        self.errores = errores_formulario(formulario, E::DESCRIPTOR.requeridos);
        self.errores.is_empty()
    }

    /// Crea o actualiza según haya un documento en edición. Devuelve `true`
    /// si el servidor aceptó el formulario.
    pub async fn enviar(&mut self, formulario: Value) -> bool {
        if !self.validar(&formulario) {
            return false;
        }

        self.cargando = true;
        let resultado = match self.editando {
            Some(id) => self.api.actualizar::<E>(id, &formulario).await,
            None => self.api.crear::<E>(&formulario).await,
        };
        self.cargando = false;

        match resultado {
            Ok(_) => {
                let accion = if self.editando.is_some() { "actualizado" } else { "creado" };
                self.notificacion = Some(Notificacion::Exito(format!(
                    "{} {} exitosamente",
                    E::DESCRIPTOR.nombre,
                    accion
                )));
                self.editando = None;
                self.recargar().await;
                true
            }
            Err(e) => {
                self.fallo("guardar", e);
                false
            }
        }
    }

    /// Pasa una fila al formulario; devuelve sus campos
    pub fn editar(&mut self, id: Uuid) -> Option<Value> {
        let doc = self.items.iter().find(|d| d.id == id)?;
        let campos = serde_json::to_value(&doc.datos).ok()?;
        self.editando = Some(id);
        self.errores.clear();
        Some(campos)
    }

    pub fn cancelar_edicion(&mut self) {
        self.editando = None;
        self.errores.clear();
    }

    /// Borra una fila si `confirmar` lo acepta. Devuelve `true` si se borró.
    pub async fn eliminar<F>(&mut self, id: Uuid, confirmar: F) -> bool
    where
        F: FnOnce(&Documento<E>) -> bool,
    {
        let Some(doc) = self.items.iter().find(|d| d.id == id) else {
            return false;
        };
        if !confirmar(doc) {
            return false;
        }

        self.cargando = true;
        let resultado = self.api.eliminar::<E>(id).await;
        self.cargando = false;

        match resultado {
            Ok(_) => {
                self.notificacion = Some(Notificacion::Exito(format!(
                    "{} eliminado exitosamente",
                    E::DESCRIPTOR.nombre
                )));
                if self.editando == Some(id) {
                    self.editando = None;
                }
                self.recargar().await;
                true
            }
            Err(e) => {
                self.fallo("eliminar", e);
                false
            }
        }
    }

    fn fallo(&mut self, accion: &str, error: ClienteError) {
        log::error!("❌ Error al {} {}: {}", accion, E::DESCRIPTOR.nombre, error);
        let mensaje = match error {
            ClienteError::Api { message, .. } => message,
            otro => otro.to_string(),
        };
        self.notificacion = Some(Notificacion::Error(mensaje));
    }
}
