//! Payload entregado al `SubmissionSink` en el último paso.
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::{FieldValue, ValidationResult};
use crate::hashing::hash_value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub session_id: Uuid,
    pub catalog_hash: String,
    /// Valores en el orden del catálogo; los campos sin tocar van vacíos.
    pub values: IndexMap<String, FieldValue>,
    /// Hash canónico de `values`; sirve como clave de idempotencia.
    pub fingerprint: String,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionPayload {
    pub fn new(session_id: Uuid, catalog_hash: String, values: IndexMap<String, FieldValue>) -> Self {
        let fingerprint = values_fingerprint(&values);
        Self { session_id, catalog_hash, values, fingerprint, submitted_at: Utc::now() }
    }

    pub fn values_json(&self) -> Value {
        let map: Map<String, Value> = self.values.iter().map(|(k, v)| (k.clone(), v.to_json())).collect();
        Value::Object(map)
    }
}

pub fn values_fingerprint(values: &IndexMap<String, FieldValue>) -> String {
    let map: Map<String, Value> = values.iter().map(|(k, v)| (k.clone(), v.to_json())).collect();
    hash_value(&Value::Object(map))
}

/// Resultado de `submit()`.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Rejected(ValidationResult),
    Accepted(SubmissionPayload),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_ignores_insertion_order() {
        let mut a = IndexMap::new();
        a.insert("x".to_string(), FieldValue::from("1"));
        a.insert("y".to_string(), FieldValue::Flag(true));
        let mut b = IndexMap::new();
        b.insert("y".to_string(), FieldValue::Flag(true));
        b.insert("x".to_string(), FieldValue::from("1"));
        assert_eq!(values_fingerprint(&a), values_fingerprint(&b));
        b.insert("x".to_string(), FieldValue::from("2"));
        assert_ne!(values_fingerprint(&a), values_fingerprint(&b));
    }
}
