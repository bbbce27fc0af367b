//! Encoder payload → registro de lead.
//!
//! El registro es el JSON que recibe el backend: valores en el orden del
//! catálogo, metadatos de la sesión y la atribución capturada (o `null`).

use form_core::SubmissionPayload;
use serde_json::{json, Value};

use crate::attribution::Attribution;

/// Contrato de empaquetado de un envío.
pub trait LeadRecordEncoder: Send + Sync {
    fn encode(&self, payload: &SubmissionPayload, attribution: Option<&Attribution>) -> Value;
}

#[derive(Debug, Clone, Default)]
pub struct SimpleLeadEncoder;

impl LeadRecordEncoder for SimpleLeadEncoder {
    fn encode(&self, payload: &SubmissionPayload, attribution: Option<&Attribution>) -> Value {
        json!({
            "sessionId": payload.session_id,
            "catalogHash": payload.catalog_hash,
            "fingerprint": payload.fingerprint,
            "submittedAt": payload.submitted_at,
            "values": payload.values_json(),
            "attribution": attribution,
        })
    }
}
