use bcrypt::{hash, verify};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::auth_dto::{
    normalizar_email, ActualizarUsuarioRequest, LoginRequest, LoginResponse, RegistroRequest,
};
use crate::models::entidad::Documento;
use crate::models::permiso::{Interruptor, Modulo, NivelAcceso, Permisos};
use crate::models::usuario::{Cargo, Usuario, UsuarioResponse};
use crate::services::acceso_service::Sesion;
use crate::services::captcha_service::VerificadorCaptcha;
use crate::services::jwt_service::JwtService;
use crate::repositories::document_store::Registro;
use crate::repositories::DocumentStore;
use crate::utils::errors::{conflict_error, not_found_error, validation_error, AppError, AppResult};

const COLECCION: &str = Usuario::COLECCION;

pub struct UsuarioController {
    store: Arc<dyn DocumentStore>,
    jwt: Arc<JwtService>,
    bcrypt_cost: u32,
}

impl UsuarioController {
    pub fn new(store: Arc<dyn DocumentStore>, jwt: Arc<JwtService>, bcrypt_cost: u32) -> Self {
        Self {
            store,
            jwt,
            bcrypt_cost,
        }
    }

    /// Registro: CAPTCHA primero, después unicidad del email, y solo entonces se escribe
    pub async fn registrar(
        &self,
        mut request: RegistroRequest,
        captcha: &dyn VerificadorCaptcha,
    ) -> AppResult<UsuarioResponse> {
        request.normalizar();
        request.validate()?;

        // el cargo admin solo se asigna desde la configuración o por otro admin
        if request.cargo == Some(Cargo::Admin) {
            return Err(AppError::Forbidden(
                "El registro público no puede asignar el cargo admin".to_string(),
            ));
        }

        let token_captcha = request.captcha.as_deref().unwrap_or_default();
        if !captcha.verificar(token_captcha).await? {
            return Err(validation_error("captcha", "verificación de CAPTCHA fallida"));
        }

        let email = request.email.unwrap_or_default();
        if self.buscar_por_email(&email).await?.is_some() {
            return Err(conflict_error("Usuario", "Email", &email));
        }

        let password = request.password.unwrap_or_default();
        let usuario = Usuario {
            nombre: request.nombre.unwrap_or_default().trim().to_string(),
            email,
            password_hash: self.hash_password(password).await?,
            cargo: request
                .cargo
                .ok_or_else(|| validation_error("Cargo", "es requerido"))?,
            unidad: request.unidad,
            memorandum: request.memorandum,
            activo: true,
            permiso: Permisos::default(),
        };

        let registro = self.store.insertar(COLECCION, a_documento(&usuario)?).await?;
        tracing::info!("👤 Usuario registrado: {} ({})", usuario.email, registro.id);

        Ok(leer(registro)?.into())
    }

    pub async fn login(&self, mut request: LoginRequest) -> AppResult<LoginResponse> {
        request.normalizar();
        request.validate()?;

        let email = request.email.unwrap_or_default();
        let credenciales_invalidas = || AppError::Unauthorized("Credenciales inválidas".to_string());

        let doc = self.buscar_por_email(&email).await?.ok_or_else(credenciales_invalidas)?;
        let password = request.password.unwrap_or_default();
        if !self.verify_password(password, doc.datos.password_hash.clone()).await? {
            return Err(credenciales_invalidas());
        }
        if !doc.datos.activo {
            return Err(AppError::Unauthorized("Usuario inactivo".to_string()));
        }

        let token = self.jwt.generate_token(doc.id, &doc.datos.nombre, doc.datos.cargo)?;
        tracing::info!("🔑 Login correcto: {}", email);

        Ok(LoginResponse {
            token,
            usuario: doc.into(),
        })
    }

    pub async fn listar(&self) -> AppResult<Vec<UsuarioResponse>> {
        let registros = self.store.listar(COLECCION).await?;
        registros
            .into_iter()
            .map(|r| leer(r).map(UsuarioResponse::from))
            .collect()
    }

    pub async fn obtener(&self, id: Uuid) -> AppResult<UsuarioResponse> {
        Ok(self.cargar(id).await?.into())
    }

    pub async fn actualizar(
        &self,
        id: Uuid,
        mut request: ActualizarUsuarioRequest,
    ) -> AppResult<UsuarioResponse> {
        request.normalizar();
        request.validate()?;
        let mut doc = self.cargar(id).await?;

        if let Some(email) = request.email {
            if let Some(otro) = self.buscar_por_email(&email).await? {
                if otro.id != id {
                    return Err(conflict_error("Usuario", "Email", &email));
                }
            }
            doc.datos.email = email;
        }
        if let Some(nombre) = request.nombre {
            doc.datos.nombre = nombre.trim().to_string();
        }
        if let Some(password) = request.password {
            doc.datos.password_hash = self.hash_password(password).await?;
        }
        if let Some(cargo) = request.cargo {
            doc.datos.cargo = cargo;
        }
        if request.unidad.is_some() {
            doc.datos.unidad = request.unidad;
        }
        if request.memorandum.is_some() {
            doc.datos.memorandum = request.memorandum;
        }

        self.guardar(id, &doc.datos).await
    }

    pub async fn eliminar(&self, id: Uuid) -> AppResult<bool> {
        let eliminado = self.store.eliminar(COLECCION, id).await?;
        if eliminado {
            tracing::info!("🗑️ Usuario eliminado: {}", id);
        }
        Ok(eliminado)
    }

    /// Baja lógica (o reactivación)
    pub async fn cambiar_estado(&self, id: Uuid, activo: bool) -> AppResult<UsuarioResponse> {
        let mut doc = self.cargar(id).await?;
        doc.datos.activo = activo;
        tracing::info!("👤 Usuario {} {}", id, if activo { "activado" } else { "desactivado" });
        self.guardar(id, &doc.datos).await
    }

    pub async fn reemplazar_permisos(&self, id: Uuid, permisos: Permisos) -> AppResult<UsuarioResponse> {
        let mut doc = self.cargar(id).await?;
        doc.datos.permiso = permisos;
        self.guardar(id, &doc.datos).await
    }

    pub async fn alternar_permiso(
        &self,
        id: Uuid,
        modulo: Modulo,
        interruptor: Interruptor,
    ) -> AppResult<(NivelAcceso, UsuarioResponse)> {
        let mut doc = self.cargar(id).await?;
        let nivel = doc.datos.permiso.alternar(modulo, interruptor);
        tracing::info!("🔐 Permiso de {} sobre {}: {:?}", id, modulo, nivel);
        Ok((nivel, self.guardar(id, &doc.datos).await?))
    }

    /// Deja una cuenta admin activa con ese email. Si la cuenta ya existe se
    /// promueve y conserva su contraseña.
    pub async fn asegurar_admin(&self, email: &str, password: &str) -> AppResult<UsuarioResponse> {
        let email = normalizar_email(email);
        if let Some(mut doc) = self.buscar_por_email(&email).await? {
            doc.datos.cargo = Cargo::Admin;
            doc.datos.activo = true;
            tracing::info!("👑 Cuenta admin asegurada: {}", email);
            return self.guardar(doc.id, &doc.datos).await;
        }

        if password.len() < 6 {
            return Err(validation_error("Password", "debe tener al menos 6 caracteres"));
        }
        let usuario = Usuario {
            nombre: "Administrador".to_string(),
            email,
            password_hash: self.hash_password(password.to_string()).await?,
            cargo: Cargo::Admin,
            unidad: None,
            memorandum: None,
            activo: true,
            permiso: Permisos::default(),
        };

        let registro = self.store.insertar(COLECCION, a_documento(&usuario)?).await?;
        tracing::info!("👑 Cuenta admin creada: {} ({})", usuario.email, registro.id);
        Ok(leer(registro)?.into())
    }

    /// Sesión de un usuario activo; `None` si no existe o está dado de baja
    pub async fn cargar_sesion(&self, id: Uuid) -> AppResult<Option<Sesion>> {
        let Some(registro) = self.store.buscar(COLECCION, id).await? else {
            return Ok(None);
        };
        let doc = leer(registro)?;
        if !doc.datos.activo {
            return Ok(None);
        }

        Ok(Some(Sesion {
            usuario_id: doc.id,
            nombre: doc.datos.nombre,
            cargo: doc.datos.cargo,
            permisos: doc.datos.permiso,
        }))
    }

    async fn cargar(&self, id: Uuid) -> AppResult<Documento<Usuario>> {
        let registro = self
            .store
            .buscar(COLECCION, id)
            .await?
            .ok_or_else(|| not_found_error("Usuario", &id.to_string()))?;
        leer(registro)
    }

    async fn guardar(&self, id: Uuid, usuario: &Usuario) -> AppResult<UsuarioResponse> {
        let registro = self
            .store
            .reemplazar(COLECCION, id, a_documento(usuario)?)
            .await?
            .ok_or_else(|| not_found_error("Usuario", &id.to_string()))?;
        Ok(leer(registro)?.into())
    }

    async fn buscar_por_email(&self, email: &str) -> AppResult<Option<Documento<Usuario>>> {
        let registro = self
            .store
            .buscar_por_campo(COLECCION, "Email", email)
            .await?
            .into_iter()
            .next();
        registro.map(leer).transpose()
    }

    async fn hash_password(&self, password: String) -> AppResult<String> {
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(|e| AppError::Hash(format!("Error hasheando password: {}", e)))
    }

    async fn verify_password(&self, password: String, password_hash: String) -> AppResult<bool> {
        tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| AppError::Internal(e.to_string()))?
            .map_err(|e| AppError::Hash(format!("Error verificando password: {}", e)))
    }
}

fn leer(registro: Registro) -> AppResult<Documento<Usuario>> {
    Documento::leer(registro, COLECCION)
}

fn a_documento(usuario: &Usuario) -> AppResult<Value> {
    serde_json::to_value(usuario).map_err(|e| AppError::Internal(e.to_string()))
}
