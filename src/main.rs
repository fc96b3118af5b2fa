use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use gestion_maquinaria::config::{DatabaseConfig, EnvironmentConfig, StorageBackend};
use gestion_maquinaria::controllers::usuario_controller::UsuarioController;
use gestion_maquinaria::database::DatabaseConnection;
use gestion_maquinaria::models::entidad::Entidad;
use gestion_maquinaria::models::{Asignacion, Control, Impuesto, Mantenimiento, Maquinaria, Seguro, Soat};
use gestion_maquinaria::repositories::{DocumentStore, MemoryStore, PostgresStore};
use gestion_maquinaria::services::JwtService;
use gestion_maquinaria::state::AppState;
use gestion_maquinaria::{colecciones, create_app};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();
    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .init();

    info!("🚜 Gestión de Maquinaria - API");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    // Inicializar almacén de documentos
    let store: Arc<dyn DocumentStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let db_connection = match DatabaseConnection::new(&db_config).await {
                Ok(conn) => conn,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(anyhow::anyhow!("Error de base de datos: {}", e));
                }
            };
            Arc::new(PostgresStore::new(db_connection.pool().clone()))
        }
        StorageBackend::Memory => {
            warn!("⚠️ STORAGE_BACKEND=memory: los datos no sobreviven al reinicio");
            Arc::new(MemoryStore::new())
        }
    };
    store.preparar(&colecciones()).await?;

    // Cuenta admin inicial: el registro público no puede crearla
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        let jwt = Arc::new(JwtService::from_config(&config));
        UsuarioController::new(store.clone(), jwt, config.bcrypt_cost)
            .asegurar_admin(email, password)
            .await?;
    } else {
        warn!("⚠️ ADMIN_EMAIL no configurado: no se asegura ninguna cuenta admin");
    }

    if !config.enforce_permissions {
        warn!("⚠️ ENFORCE_PERMISSIONS=false: los permisos solo se aplican en el cliente");
    }
    if config.captcha_secret.is_none() {
        warn!("⚠️ CAPTCHA_SECRET no configurado: el registro no verifica CAPTCHA");
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let app = create_app(AppState::new(store, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    for ruta in [
        Maquinaria::DESCRIPTOR.ruta,
        Asignacion::DESCRIPTOR.ruta,
        Control::DESCRIPTOR.ruta,
        Mantenimiento::DESCRIPTOR.ruta,
        Seguro::DESCRIPTOR.ruta,
        Soat::DESCRIPTOR.ruta,
        Impuesto::DESCRIPTOR.ruta,
    ] {
        info!("   GET|POST /api/{} - GET|PUT|DELETE /api/{}/:id", ruta, ruta);
    }
    info!("👤 Endpoints de usuarios:");
    info!("   POST /api/usuarios/registro - Registrar usuario");
    info!("   POST /api/usuarios/login - Login");
    info!("   GET  /api/usuarios - Listar usuarios");
    info!("   GET  /api/usuarios/modulos - Módulos con permisos");
    info!("   GET|PUT|DELETE /api/usuarios/:id - Usuario");
    info!("   PATCH /api/usuarios/:id/activo - Activar/desactivar");
    info!("   PUT  /api/usuarios/:id/permisos - Reemplazar permisos");
    info!("   PATCH /api/usuarios/:id/permisos/:modulo - Accionar interruptor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo escuchar Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut senal) => {
                senal.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo escuchar SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
