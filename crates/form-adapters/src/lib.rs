//! form-adapters: implementaciones concretas de los puertos del core.
//!
//! Este crate provee:
//! - `JsonFileCatalog`: catálogo de campos leído de un archivo JSON.
//! - `JsonLinesSink`: sink que agrega cada envío como una línea JSON.
//! - `AttributionChain`: cadena ordenada de fuentes de atribución
//!   (UTM / click ids), la primera que aporta datos gana.
//! - `LeadRecordEncoder`: empaqueta payload + atribución en el registro que
//!   recibe el backend.

pub mod attribution;
pub mod catalog;
pub mod encoder;
pub mod error;
pub mod sink;

pub use attribution::{Attribution, AttributionChain, AttributionSource, MessageSource, UrlSource};
pub use catalog::JsonFileCatalog;
pub use encoder::{LeadRecordEncoder, SimpleLeadEncoder};
pub use error::AdapterError;
pub use sink::JsonLinesSink;
