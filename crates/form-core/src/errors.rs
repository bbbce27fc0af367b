//! Errores del core. Sólo cubren violaciones de precondición; los campos
//! obligatorios vacíos se reportan como datos en `ValidationResult`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreEngineError {
    #[error("catalog not loaded")] CatalogNotLoaded,
    #[error("catalog already loaded for this session")] CatalogAlreadyLoaded,
    #[error("invalid step index {step} (total steps {total})")] InvalidStepIndex { step: usize, total: usize },
    #[error("unknown field: {0}")] UnknownField(String),
    #[error("duplicate field id: {0}")] DuplicateField(String),
    #[error("invalid field definition: {0}")] InvalidDefinition(String),
    #[error("submit only allowed on last step (current {current}, total {total})")] NotOnLastStep { current: usize, total: usize },
    #[error("catalog source: {0}")] Catalog(String),
    #[error("submission sink: {0}")] Sink(String),
    #[error("internal: {0}")] Internal(String),
}
