//! Particionado del catálogo en pasos y estado de navegación.
//!
//! Un paso es un grupo contiguo de campos renderizables delimitado por campos
//! de división. Con `k` divisiones hay `k + 1` pasos; los pasos se numeran
//! desde 1.

mod partition;
mod state;

pub use partition::{compute_steps, StepPartition};
pub use state::StepState;
