//! Repositorios
//!
//! Acceso a las colecciones de documentos. `DocumentStore` es la costura:
//! PostgreSQL en producción, memoria para desarrollo local y tests.

pub mod document_store;
pub mod memory_store;
pub mod postgres_store;

pub use document_store::{DocumentStore, Registro};
pub use memory_store::MemoryStore;
pub use postgres_store::PostgresStore;
