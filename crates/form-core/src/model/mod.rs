//! Modelos de datos de la sesión: valores, resultados de validación y payload.

mod payload;
mod validation;
mod value;

pub use payload::{SubmissionPayload, SubmitOutcome};
pub use validation::{ErrorMap, ValidationResult};
pub use value::FieldValue;
