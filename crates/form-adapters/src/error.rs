//! Errores de adaptadores (I/O, JSON, URLs).

use form_core::CoreEngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("url: {0}")]
    Url(#[from] url::ParseError),
    #[error("catalog: {0}")]
    Catalog(String),
}

impl AdapterError {
    pub fn into_catalog_error(self) -> CoreEngineError {
        CoreEngineError::Catalog(self.to_string())
    }

    pub fn into_sink_error(self) -> CoreEngineError {
        CoreEngineError::Sink(self.to_string())
    }
}
