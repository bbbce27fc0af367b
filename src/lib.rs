//! LeadForm Rust Library
//!
//! Este crate actúa como la capa de aplicación de LeadForm:
//! - `config`: variables de entorno (.env) y `CONFIG` global perezoso.
//! - `errors`: `AppError`, agregando los errores de core, dominio y adaptadores.
//! - `logging`: inicialización del subscriber para binarios.
//! - `script`: recorre un formulario aplicando respuestas predefinidas.
//!
//! Puede usarse desde `main.rs` o desde `form-cli`.

pub mod config;
pub mod errors;
pub mod logging;
pub mod script;

pub use config::{AppConfig, CONFIG};
pub use errors::AppError;
