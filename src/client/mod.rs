//! Cliente de la API
//!
//! Lo que consume la interfaz: el cliente HTTP, la sesión explícita tras
//! el login, el panel de cada entidad y el editor de permisos.

pub mod api_client;
pub mod editor_permisos;
pub mod panel;
pub mod sesion;

pub use api_client::{ApiClient, ClienteConfig, ClienteError, ClienteResult};
pub use editor_permisos::EditorPermisos;
pub use panel::{Notificacion, PanelEntidad};
pub use sesion::{estado_pagina, SesionCliente};
