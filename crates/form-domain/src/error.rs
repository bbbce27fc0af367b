use thiserror::Error;

/// Error del dominio de formularios (definiciones de campo y documentos).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Error de validación: {0}")]
    ValidationError(String),

    #[error("Documento inválido ({kind}): {value}")]
    InvalidDocument { kind: &'static str, value: String },
}
