//! Inicialización de logs para binarios.
//!
//! Los crates de librería escriben a través de la fachada `log`; el
//! subscriber de `tracing-subscriber` recoge esos registros y los imprime
//! por stderr. `RUST_LOG` tiene prioridad sobre el nivel configurado.
use tracing_subscriber::EnvFilter;

use crate::AppError;

pub fn init_logging(level: &str, debug_override: bool) -> Result<(), AppError> {
    let level = if debug_override { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))
                                                   .map_err(|e| AppError::Config(format!("log level {level}: {e}")))?;
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .with_target(false)
                             .try_init()
                             .map_err(|e| AppError::Config(format!("logging already initialized: {e}")))
}
