use form_adapters::AdapterError;
use form_core::CoreEngineError;
use form_domain::DomainError;
use thiserror::Error;

/// Error de aplicación: agrega los errores de cada crate del workspace.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error del motor: {0}")]
    Core(#[from] CoreEngineError),
    #[error("Error de dominio: {0}")]
    Domain(#[from] DomainError),
    #[error("Error de adaptador: {0}")]
    Adapter(#[from] AdapterError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error de configuración: {0}")]
    Config(String),
}
