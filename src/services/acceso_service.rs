use axum::http::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::permiso::{Accion, Modulo, NivelAcceso, Permisos};
use crate::models::usuario::Cargo;
use crate::utils::errors::AppError;

/// Sesión autenticada. Se pasa explícitamente a quien la necesite: el
/// middleware la inyecta en la request, el cliente la guarda tras el login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sesion {
    pub usuario_id: Uuid,
    pub nombre: String,
    pub cargo: Cargo,
    pub permisos: Permisos,
}

/// Resultado de la puerta de acceso
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstadoAcceso {
    /// Sin sesión: a login
    Anonimo,
    Permitido,
    /// Con sesión pero sin permiso: a la vista de acceso denegado
    Denegado,
}

impl EstadoAcceso {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstadoAcceso::Anonimo => "anonimo",
            EstadoAcceso::Permitido => "permitido",
            EstadoAcceso::Denegado => "denegado",
        }
    }
}

impl Sesion {
    pub fn nivel(&self, modulo: Modulo) -> NivelAcceso {
        // admin no depende de los permisos por módulo
        if self.cargo == Cargo::Admin {
            return NivelAcceso::Editar;
        }
        self.permisos.nivel(modulo)
    }

    pub fn puede(&self, modulo: Modulo, accion: Accion) -> bool {
        self.nivel(modulo).permite(accion)
    }
}

/// Evalúa la puerta para una acción sobre un módulo
pub fn evaluar(sesion: Option<&Sesion>, modulo: Modulo, accion: Accion) -> EstadoAcceso {
    match sesion {
        None => EstadoAcceso::Anonimo,
        Some(s) if s.puede(modulo, accion) => EstadoAcceso::Permitido,
        Some(_) => EstadoAcceso::Denegado,
    }
}

/// Operaciones reservadas al cargo admin, como cambiar el cargo de alguien
pub fn exigir_admin(sesion: Option<&Sesion>) -> Result<(), AppError> {
    match sesion {
        Some(s) if s.cargo == Cargo::Admin => Ok(()),
        Some(s) => Err(AppError::Forbidden(format!(
            "{} no tiene cargo admin",
            s.nombre
        ))),
        None => Err(AppError::Unauthorized("Sesión requerida".to_string())),
    }
}

/// Acción que implica un método HTTP
pub fn accion_para_metodo(metodo: &Method) -> Accion {
    if *metodo == Method::GET || *metodo == Method::HEAD || *metodo == Method::OPTIONS {
        Accion::Ver
    } else if *metodo == Method::DELETE {
        Accion::Eliminar
    } else {
        Accion::Editar
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sesion(cargo: Cargo, permisos: Permisos) -> Sesion {
        Sesion {
            usuario_id: Uuid::new_v4(),
            nombre: "Ana".to_string(),
            cargo,
            permisos,
        }
    }

    #[test]
    fn test_anonymous_without_session() {
        assert_eq!(evaluar(None, Modulo::Maquinaria, Accion::Ver), EstadoAcceso::Anonimo);
    }

    #[test]
    fn test_view_level_allows_only_reads() {
        let tecnico = sesion(Cargo::Tecnico, Permisos::default());
        assert_eq!(evaluar(Some(&tecnico), Modulo::Control, Accion::Ver), EstadoAcceso::Permitido);
        assert_eq!(evaluar(Some(&tecnico), Modulo::Control, Accion::Editar), EstadoAcceso::Denegado);
    }

    #[test]
    fn test_denied_module_blocks_everything() {
        let mut permisos = Permisos::default();
        permisos.asignar(Modulo::Seguro, NivelAcceso::Denegado);
        permisos.asignar(Modulo::Soat, NivelAcceso::Editar);
        let encargado = sesion(Cargo::Encargado, permisos);

        assert_eq!(evaluar(Some(&encargado), Modulo::Seguro, Accion::Ver), EstadoAcceso::Denegado);
        assert_eq!(evaluar(Some(&encargado), Modulo::Soat, Accion::Eliminar), EstadoAcceso::Permitido);
    }

    #[test]
    fn test_admin_bypasses_module_levels() {
        let mut permisos = Permisos::default();
        permisos.asignar(Modulo::Usuarios, NivelAcceso::Denegado);
        let admin = sesion(Cargo::Admin, permisos);

        assert_eq!(evaluar(Some(&admin), Modulo::Usuarios, Accion::Eliminar), EstadoAcceso::Permitido);
    }

    #[test]
    fn test_exigir_admin() {
        let mut permisos = Permisos::default();
        permisos.asignar(Modulo::Usuarios, NivelAcceso::Editar);
        let encargado = sesion(Cargo::Encargado, permisos);

        assert!(exigir_admin(Some(&sesion(Cargo::Admin, Permisos::default()))).is_ok());
        assert!(matches!(exigir_admin(Some(&encargado)), Err(AppError::Forbidden(_))));
        assert!(matches!(exigir_admin(None), Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_accion_para_metodo() {
        assert_eq!(accion_para_metodo(&Method::GET), Accion::Ver);
        assert_eq!(accion_para_metodo(&Method::POST), Accion::Editar);
        assert_eq!(accion_para_metodo(&Method::PUT), Accion::Editar);
        assert_eq!(accion_para_metodo(&Method::PATCH), Accion::Editar);
        assert_eq!(accion_para_metodo(&Method::DELETE), Accion::Eliminar);
    }
}
