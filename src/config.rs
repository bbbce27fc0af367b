//! Configuración central de la aplicación.
//! Carga variables de entorno (.env) y expone una estructura inmutable (`CONFIG`).
use form_domain::MaskSettings;
use log::warn;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

/// Configuración global de la aplicación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Catálogo de campos por defecto.
    pub catalog_path: PathBuf,
    /// Archivo JSON-lines donde se agregan los envíos.
    pub submissions_path: PathBuf,
    /// Nivel de log si `RUST_LOG` no está definido.
    pub log_level: String,
    pub masks: MaskSettings,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        Self::from_lookup(|k| env::var(k).ok())
    }

    /// Construye la configuración a partir de una función de búsqueda
    /// (variables de entorno u otra fuente).
    pub fn from_lookup<F>(lookup: F) -> Self
        where F: Fn(&str) -> Option<String>
    {
        let defaults = MaskSettings::default();
        let get = |k: &str, d: &str| lookup(k).filter(|v| !v.trim().is_empty()).unwrap_or_else(|| d.to_string());
        let mut country_code = get("LEADFORM_COUNTRY_CODE", &defaults.country_code);
        if !country_code.chars().all(|c| c.is_ascii_digit()) {
            warn!("config:invalid LEADFORM_COUNTRY_CODE={country_code}, usando {}", defaults.country_code);
            country_code = defaults.country_code.clone();
        }
        Self { catalog_path: PathBuf::from(get("LEADFORM_CATALOG_PATH", "form.json")),
               submissions_path: PathBuf::from(get("LEADFORM_SUBMISSIONS_PATH", "submissions.jsonl")),
               log_level: get("LEADFORM_LOG_LEVEL", "info"),
               masks: MaskSettings { currency_symbol: get("LEADFORM_CURRENCY_SYMBOL", &defaults.currency_symbol),
                                     country_code } }
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);
