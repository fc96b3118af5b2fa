//! Editor de permisos de un usuario
//!
//! Una fila por módulo con dos interruptores (habilitar edición, denegar).
//! Los cambios se acumulan localmente y `guardar` reemplaza el mapa
//! completo en el servidor.

use uuid::Uuid;

use crate::client::api_client::{ApiClient, ClienteResult};
use crate::models::permiso::{FlagsPermiso, Interruptor, Modulo, NivelAcceso, Permisos};
use crate::models::usuario::UsuarioResponse;

#[derive(Debug, Clone)]
pub struct EditorPermisos {
    usuario_id: Uuid,
    permisos: Permisos,
    modificado: bool,
}

impl EditorPermisos {
    pub fn new(usuario: &UsuarioResponse) -> Self {
        Self {
            usuario_id: usuario.id,
            permisos: usuario.permiso.clone(),
            modificado: false,
        }
    }

    pub async fn cargar(api: &ApiClient, usuario_id: Uuid) -> ClienteResult<Self> {
        Ok(Self::new(&api.usuario(usuario_id).await?))
    }

    pub fn usuario_id(&self) -> Uuid {
        self.usuario_id
    }

    pub fn permisos(&self) -> &Permisos {
        &self.permisos
    }

    pub fn modificado(&self) -> bool {
        self.modificado
    }

    /// Filas del editor en el orden fijo de los módulos
    pub fn filas(&self) -> Vec<(Modulo, FlagsPermiso)> {
        self.permisos
            .completos()
            .into_iter()
            .map(|(modulo, nivel)| (modulo, FlagsPermiso::from(nivel)))
            .collect()
    }

    pub fn alternar(&mut self, modulo: Modulo, interruptor: Interruptor) -> NivelAcceso {
        self.modificado = true;
        self.permisos.alternar(modulo, interruptor)
    }

    pub async fn guardar(&mut self, api: &ApiClient) -> ClienteResult<UsuarioResponse> {
        let usuario = api.reemplazar_permisos(self.usuario_id, &self.permisos).await?;
        log::info!("🔐 Permisos guardados para {}", self.usuario_id);
        self.permisos = usuario.permiso.clone();
        self.modificado = false;
        Ok(usuario)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usuario::Cargo;
    use chrono::Utc;

    fn editor() -> EditorPermisos {
        EditorPermisos::new(&UsuarioResponse {
            id: Uuid::new_v4(),
            nombre: "Luis".to_string(),
            email: "luis@example.com".to_string(),
            cargo: Cargo::Tecnico,
            unidad: None,
            memorandum: None,
            activo: true,
            permiso: Permisos::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
    }

    #[test]
    fn test_rows_cover_every_module() {
        let editor = editor();
        let filas = editor.filas();
        assert_eq!(filas.len(), Modulo::TODOS.len());
        assert!(filas.iter().all(|(_, f)| f.ver && !f.editar && !f.eliminar));
        assert!(!editor.modificado());
    }

    #[test]
    fn test_switches_are_mutually_exclusive() {
        let mut editor = editor();
        editor.alternar(Modulo::Seguro, Interruptor::Habilitar);
        editor.alternar(Modulo::Seguro, Interruptor::Denegar);

        let (_, flags) = editor
            .filas()
            .into_iter()
            .find(|(m, _)| *m == Modulo::Seguro)
            .unwrap();
        assert!(flags.eliminar);
        assert!(!flags.editar);
        assert!(editor.modificado());
    }
}
