use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use gestion_maquinaria::client::{
    estado_pagina, ApiClient, ClienteConfig, ClienteError, EditorPermisos, Notificacion,
    PanelEntidad, SesionCliente,
};
use gestion_maquinaria::config::{EnvironmentConfig, StorageBackend};
use gestion_maquinaria::controllers::usuario_controller::UsuarioController;
use gestion_maquinaria::create_app;
use gestion_maquinaria::dto::auth_dto::RegistroRequest;
use gestion_maquinaria::models::{Cargo, Interruptor, Maquinaria, Modulo, Seguro};
use gestion_maquinaria::repositories::MemoryStore;
use gestion_maquinaria::services::{EstadoAcceso, VerificadorCaptcha};
use gestion_maquinaria::state::AppState;
use gestion_maquinaria::utils::errors::AppError;

#[tokio::test]
async fn test_panel_create_edit_delete() {
    let api = spawn_server(false).await;
    let mut panel = PanelEntidad::<Maquinaria>::new(api);

    panel.montar().await;
    assert!(panel.items.is_empty());
    assert!(panel.notificacion.is_none());

    assert!(panel.enviar(json!({"detalle": "Tractor", "placa": "ABC123", "unidad": "U1"})).await);
    assert_eq!(panel.items.len(), 1);
    assert!(matches!(panel.notificacion, Some(Notificacion::Exito(_))));

    let id = panel.items[0].id;
    let mut formulario = panel.editar(id).unwrap();
    formulario["marca"] = json!("John Deere");
    assert!(panel.enviar(formulario).await);
    assert_eq!(panel.items[0].datos.marca.as_deref(), Some("John Deere"));
    assert!(panel.editando.is_none());

    // sin confirmación no se borra
    assert!(!panel.eliminar(id, |_| false).await);
    assert_eq!(panel.items.len(), 1);

    assert!(panel.eliminar(id, |doc| doc.datos.placa.as_deref() == Some("ABC123")).await);
    assert!(panel.items.is_empty());
}

#[tokio::test]
async fn test_panel_surfaces_server_errors_as_toast() {
    let api = spawn_server(false).await;
    let mut panel = PanelEntidad::<Seguro>::new(api);

    // requeridos presentes, fecha ilegible: lo rechaza el servidor
    let enviado = panel
        .enviar(json!({
            "maquinaria": uuid::Uuid::new_v4(),
            "numeroPoliza": "P-1",
            "aseguradora": "La Boliviana",
            "fechaInicio": "ayer",
            "fechaFin": "2024-12-31"
        }))
        .await;

    assert!(!enviado);
    assert!(panel.errores.is_empty());
    assert!(matches!(panel.notificacion, Some(Notificacion::Error(_))));
    assert!(panel.items.is_empty());
}

#[tokio::test]
async fn test_session_and_permission_editor() {
    let api = spawn_server(true).await;

    let registro = |email: &str, cargo| RegistroRequest {
        nombre: Some("Prueba".to_string()),
        email: Some(email.to_string()),
        password: Some("secreto1".to_string()),
        cargo: Some(cargo),
        captcha: Some("tok".to_string()),
        ..Default::default()
    };
    api.registrar(&registro("tec@example.com", Cargo::Tecnico)).await.unwrap();

    // el cargo admin no se obtiene registrándose
    let intento = api.registrar(&registro("otro@example.com", Cargo::Admin)).await;
    assert!(matches!(intento, Err(ClienteError::Api { status: 403, .. })));

    assert_eq!(estado_pagina(None, Modulo::Control), EstadoAcceso::Anonimo);

    let admin = SesionCliente::iniciar(&api, "admin@example.com", "secreto1").await.unwrap();
    let mut tecnico = SesionCliente::iniciar(&api, "tec@example.com", "secreto1").await.unwrap();
    assert_eq!(tecnico.estado(Modulo::Control), EstadoAcceso::Permitido);

    // sin token la API rechaza
    let sin_token = api.listar::<Maquinaria>().await;
    assert!(matches!(sin_token, Err(ClienteError::Api { status: 401, .. })));

    let api_admin = admin.cliente(&api);
    let mut editor = EditorPermisos::cargar(&api_admin, tecnico.usuario().id).await.unwrap();
    editor.alternar(Modulo::Control, Interruptor::Denegar);
    editor.alternar(Modulo::Maquinaria, Interruptor::Habilitar);
    editor.guardar(&api_admin).await.unwrap();
    assert!(!editor.modificado());

    tecnico.refrescar(&api).await.unwrap();
    assert_eq!(tecnico.estado(Modulo::Control), EstadoAcceso::Denegado);

    let api_tecnico = tecnico.cliente(&api);
    let controles = api_tecnico.listar::<gestion_maquinaria::models::Control>().await;
    assert!(matches!(controles, Err(ClienteError::Api { status: 403, .. })));

    let creado = api_tecnico
        .crear::<Maquinaria>(&json!({"detalle": "Grúa", "placa": "GR-1", "unidad": "U2"}))
        .await
        .unwrap();
    assert_eq!(creado.datos.placa.as_deref(), Some("GR-1"));
}

// Helpers

struct CaptchaAceptado;

#[async_trait]
impl VerificadorCaptcha for CaptchaAceptado {
    async fn verificar(&self, _token: &str) -> Result<bool, AppError> {
        Ok(true)
    }
}

async fn spawn_server(enforce_permissions: bool) -> ApiClient {
    let config = EnvironmentConfig {
        environment: "test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        log_level: "debug".to_string(),
        storage_backend: StorageBackend::Memory,
        jwt_secret: "secreto-de-prueba".to_string(),
        jwt_expiration: 3600,
        bcrypt_cost: 4,
        cors_origins: vec![],
        enforce_permissions,
        captcha_secret: None,
        captcha_verify_url: "http://127.0.0.1:9/verify".to_string(),
        admin_email: None,
        admin_password: None,
    };
    let state = AppState::with_captcha(Arc::new(MemoryStore::new()), config, Arc::new(CaptchaAceptado));
    UsuarioController::new(state.store.clone(), state.jwt.clone(), state.config.bcrypt_cost)
        .asegurar_admin("admin@example.com", "secreto1")
        .await
        .unwrap();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ApiClient::new(ClienteConfig::new(format!("http://{}", addr))).unwrap()
}
