//! form-core: motor de pasos de formularios multi-paso.
//!
//! Dado un catálogo ordenado de campos (algunos marcados como divisiones),
//! el `StepEngine` particiona los pasos, guarda los valores de campo, valida
//! los obligatorios antes de avanzar y arma el payload final.
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod repo;
pub mod step;

pub use engine::{FormSession, StepEngine};
pub use errors::CoreEngineError;
pub use event::{EventStore, InMemoryEventStore, SessionEvent, SessionEventKind};
pub use model::{ErrorMap, FieldValue, SubmissionPayload, SubmitOutcome, ValidationResult};
pub use repo::{FieldCatalog, InMemoryFieldCatalog, MemorySink, SubmissionSink};
pub use step::{compute_steps, StepPartition, StepState};

pub use form_domain::{FieldDefinition, FieldType, FormatIssue, MaskSettings};
