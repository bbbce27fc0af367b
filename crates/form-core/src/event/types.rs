//! Tipos de evento de una sesión de formulario.
//!
//! Cada operación del `StepEngine` deja un rastro en el `EventStore`. Los
//! eventos no guardan valores de campo, sólo ids: el contenido de la
//! respuesta viaja únicamente en el `SubmissionPayload`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// Catálogo cargado. Invariante: primer evento de cada `session_id`.
    SessionInitialized { catalog_hash: String, total_steps: usize },
    ValueSet { field_id: String, step: usize },
    /// Resultado de validar un paso (`missing` vacío = válido).
    StepValidated { step: usize, missing: Vec<String> },
    StepAdvanced { from: usize, to: usize },
    SubmissionRejected { missing: Vec<String> },
    SubmissionAccepted { fingerprint: String },
    /// Cierre de la sesión; los eventos siguientes usan un `session_id` nuevo.
    SessionReset,
}

impl SessionEventKind {
    /// Código compacto de una letra, útil para aserciones de secuencia.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionInitialized { .. } => "I",
            Self::ValueSet { .. } => "V",
            Self::StepValidated { .. } => "K",
            Self::StepAdvanced { .. } => "A",
            Self::SubmissionRejected { .. } => "X",
            Self::SubmissionAccepted { .. } => "S",
            Self::SessionReset => "R",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    pub seq: u64, // asignado por el store (orden append)
    pub session_id: Uuid,
    pub kind: SessionEventKind,
    pub ts: DateTime<Utc>,
}
