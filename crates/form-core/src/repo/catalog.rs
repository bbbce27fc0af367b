use async_trait::async_trait;
use form_domain::FieldDefinition;

use crate::errors::CoreEngineError;

/// Fuente de definiciones de campo de un formulario.
#[async_trait]
pub trait FieldCatalog: Send + Sync {
    async fn load(&self) -> Result<Vec<FieldDefinition>, CoreEngineError>;
}

/// Catálogo fijo en memoria (tests y demos).
#[derive(Debug, Clone, Default)]
pub struct InMemoryFieldCatalog {
    fields: Vec<FieldDefinition>,
}

impl InMemoryFieldCatalog {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }
}

#[async_trait]
impl FieldCatalog for InMemoryFieldCatalog {
    async fn load(&self) -> Result<Vec<FieldDefinition>, CoreEngineError> {
        Ok(self.fields.clone())
    }
}
