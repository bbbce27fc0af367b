use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// fieldId → mensaje legible.
pub type ErrorMap = BTreeMap<String, String>;

/// Resultado de validar un paso o el catálogo completo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub missing_field_ids: Vec<String>,
}

impl ValidationResult {
    pub fn from_missing(missing_field_ids: Vec<String>) -> Self {
        Self { is_valid: missing_field_ids.is_empty(), missing_field_ids }
    }
}
