//! Puertos hacia colaboradores externos: origen del catálogo de campos y
//! destino de los envíos. Ambos son I/O asíncrono que se espera (no
//! fire-and-forget).

mod catalog;
mod sink;

pub use catalog::{FieldCatalog, InMemoryFieldCatalog};
pub use sink::{MemorySink, SubmissionSink};
