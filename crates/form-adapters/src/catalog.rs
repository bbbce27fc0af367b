//! Catálogo de campos desde archivo JSON.
//!
//! Formatos aceptados: `{ "fields": [...] }` o directamente `[...]`.

use async_trait::async_trait;
use form_core::{CoreEngineError, FieldCatalog};
use form_domain::FieldDefinition;
use log::debug;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::AdapterError;

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { fields: Vec<FieldDefinition> },
    Bare(Vec<FieldDefinition>),
}

/// Parsea el texto de un catálogo.
pub fn parse_catalog(text: &str) -> Result<Vec<FieldDefinition>, AdapterError> {
    let doc: CatalogDocument = serde_json::from_str(text)?;
    let fields = match doc {
        CatalogDocument::Wrapped { fields } => fields,
        CatalogDocument::Bare(fields) => fields,
    };
    if fields.is_empty() {
        return Err(AdapterError::Catalog("catalog has no fields".into()));
    }
    Ok(fields)
}

#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<FieldDefinition>, AdapterError> {
        let text = tokio::fs::read_to_string(&self.path).await?;
        let fields = parse_catalog(&text)?;
        debug!("catalog:loaded path={} fields={}", self.path.display(), fields.len());
        Ok(fields)
    }
}

#[async_trait]
impl FieldCatalog for JsonFileCatalog {
    async fn load(&self) -> Result<Vec<FieldDefinition>, CoreEngineError> {
        self.read().await.map_err(AdapterError::into_catalog_error)
    }
}
