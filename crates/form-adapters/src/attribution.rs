//! Captura de atribución (UTM / click ids) como cadena de estrategias.
//!
//! Un formulario embebido en iframe no siempre puede leer la URL de la
//! página contenedora. Cada fuente intenta por su lado y la cadena se queda
//! con la primera que aporta al menos una clave rastreada. El orden de la
//! cadena es explícito y lo decide quien la arma.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use crate::AdapterError;

/// Claves de query string que se conservan.
pub const TRACKED_KEYS: [&str; 7] = ["utm_source", "utm_medium", "utm_campaign", "utm_term", "utm_content", "gclid", "fbclid"];

pub type AttributionParams = BTreeMap<String, String>;

/// Atribución capturada y la fuente que la aportó.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    pub source: String,
    pub params: AttributionParams,
}

fn keep_tracked<'a, I>(pairs: I) -> AttributionParams
    where I: IntoIterator<Item = (&'a str, &'a str)>
{
    pairs.into_iter()
         .filter(|(k, v)| TRACKED_KEYS.contains(k) && !v.trim().is_empty())
         .map(|(k, v)| (k.to_string(), v.trim().to_string()))
         .collect()
}

/// Parámetros rastreados de una URL absoluta.
pub fn params_from_url(raw: &str) -> Result<AttributionParams, AdapterError> {
    let url = Url::parse(raw)?;
    let pairs: Vec<(String, String)> = url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
    Ok(keep_tracked(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
}

pub trait AttributionSource: Send + Sync {
    fn name(&self) -> &str;
    /// `None` o un mapa vacío significan "esta fuente no sabe nada".
    fn capture(&self) -> Option<AttributionParams>;
}

/// Datos enviados por la página contenedora vía mensaje entre frames.
#[derive(Debug, Clone, Default)]
pub struct MessageSource {
    data: BTreeMap<String, String>,
}

impl MessageSource {
    pub fn new(data: BTreeMap<String, String>) -> Self {
        Self { data }
    }
}

impl AttributionSource for MessageSource {
    fn name(&self) -> &str {
        "message"
    }

    fn capture(&self) -> Option<AttributionParams> {
        Some(keep_tracked(self.data.iter().map(|(k, v)| (k.as_str(), v.as_str()))))
    }
}

/// Fuente basada en una URL (la del padre, el referrer o la propia página).
#[derive(Debug, Clone)]
pub struct UrlSource {
    name: &'static str,
    url: Option<String>,
}

impl UrlSource {
    pub fn parent_url(url: Option<String>) -> Self {
        Self { name: "parent_url", url }
    }

    pub fn referrer(url: Option<String>) -> Self {
        Self { name: "referrer", url }
    }

    pub fn page_url(url: Option<String>) -> Self {
        Self { name: "page_url", url }
    }
}

impl AttributionSource for UrlSource {
    fn name(&self) -> &str {
        self.name
    }

    fn capture(&self) -> Option<AttributionParams> {
        let raw = self.url.as_deref()?;
        match params_from_url(raw) {
            Ok(params) => Some(params),
            Err(e) => {
                warn!("attribution:unparseable source={} error={}", self.name, e);
                None
            }
        }
    }
}

/// Cadena ordenada de fuentes; gana la primera con datos.
#[derive(Default)]
pub struct AttributionChain {
    sources: Vec<Box<dyn AttributionSource>>,
}

impl AttributionChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, source: impl AttributionSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Orden por defecto: mensaje del padre, URL del padre, referrer, URL
    /// propia del iframe.
    pub fn standard(message: BTreeMap<String, String>,
                    parent_url: Option<String>,
                    referrer: Option<String>,
                    page_url: Option<String>)
                    -> Self {
        Self::new().with_source(MessageSource::new(message))
                   .with_source(UrlSource::parent_url(parent_url))
                   .with_source(UrlSource::referrer(referrer))
                   .with_source(UrlSource::page_url(page_url))
    }

    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    pub fn capture(&self) -> Option<Attribution> {
        for source in &self.sources {
            match source.capture() {
                Some(params) if !params.is_empty() => {
                    debug!("attribution:captured source={} keys={}", source.name(), params.len());
                    return Some(Attribution { source: source.name().to_string(), params });
                }
                _ => debug!("attribution:empty source={}", source.name()),
            }
        }
        None
    }
}
