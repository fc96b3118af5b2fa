//! Sesión del lado del cliente
//!
//! La sesión se obtiene del login y se pasa explícitamente a quien la use.
//! Sin sesión cualquier página queda en `Anonimo` (a login).

use crate::client::api_client::{ApiClient, ClienteResult};
use crate::dto::auth_dto::LoginResponse;
use crate::models::permiso::{Accion, Modulo};
use crate::models::usuario::UsuarioResponse;
use crate::services::acceso_service::{evaluar, EstadoAcceso, Sesion};

#[derive(Debug, Clone)]
pub struct SesionCliente {
    token: String,
    usuario: UsuarioResponse,
}

impl SesionCliente {
    pub fn desde_login(respuesta: LoginResponse) -> Self {
        Self {
            token: respuesta.token,
            usuario: respuesta.usuario,
        }
    }

    /// Login contra la API y sesión resultante
    pub async fn iniciar(api: &ApiClient, email: &str, password: &str) -> ClienteResult<Self> {
        let respuesta = api.login(email, password).await?;
        log::info!("🔑 Sesión iniciada: {}", respuesta.usuario.email);
        Ok(Self::desde_login(respuesta))
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn usuario(&self) -> &UsuarioResponse {
        &self.usuario
    }

    /// Cliente que envía el token de esta sesión
    pub fn cliente(&self, api: &ApiClient) -> ApiClient {
        api.con_token(&self.token)
    }

    /// Vuelve a leer el usuario (p. ej. tras cambiar sus permisos)
    pub async fn refrescar(&mut self, api: &ApiClient) -> ClienteResult<()> {
        self.usuario = self.cliente(api).usuario(self.usuario.id).await?;
        Ok(())
    }

    fn sesion(&self) -> Sesion {
        Sesion {
            usuario_id: self.usuario.id,
            nombre: self.usuario.nombre.clone(),
            cargo: self.usuario.cargo,
            permisos: self.usuario.permiso.clone(),
        }
    }

    /// Estado de la puerta para la página de un módulo
    pub fn estado(&self, modulo: Modulo) -> EstadoAcceso {
        estado_pagina(Some(self), modulo)
    }

    pub fn puede(&self, modulo: Modulo, accion: Accion) -> bool {
        self.sesion().puede(modulo, accion)
    }
}

/// Estado de una página con o sin sesión
pub fn estado_pagina(sesion: Option<&SesionCliente>, modulo: Modulo) -> EstadoAcceso {
    let sesion = sesion.map(SesionCliente::sesion);
    evaluar(sesion.as_ref(), modulo, Accion::Ver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::permiso::{NivelAcceso, Permisos};
    use crate::models::usuario::Cargo;
    use chrono::Utc;
    use uuid::Uuid;

    fn sesion(cargo: Cargo, permisos: Permisos) -> SesionCliente {
        SesionCliente::desde_login(LoginResponse {
            token: "tok".to_string(),
            usuario: UsuarioResponse {
                id: Uuid::new_v4(),
                nombre: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                cargo,
                unidad: None,
                memorandum: None,
                activo: true,
                permiso: permisos,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        })
    }

    #[test]
    fn test_without_session_is_anonymous() {
        assert_eq!(estado_pagina(None, Modulo::Maquinaria), EstadoAcceso::Anonimo);
    }

    #[test]
    fn test_denied_module_page() {
        let mut permisos = Permisos::default();
        permisos.asignar(Modulo::Impuesto, NivelAcceso::Denegado);
        let s = sesion(Cargo::Encargado, permisos);

        assert_eq!(s.estado(Modulo::Impuesto), EstadoAcceso::Denegado);
        assert_eq!(s.estado(Modulo::Maquinaria), EstadoAcceso::Permitido);
        assert!(!s.puede(Modulo::Maquinaria, Accion::Editar));
        assert_eq!(s.token(), "tok");
    }
}
