use async_trait::async_trait;
use std::sync::Mutex;

use crate::errors::CoreEngineError;
use crate::model::SubmissionPayload;

/// Receptor del payload final (persistencia, routing e integraciones viven
/// detrás de esta interfaz).
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), CoreEngineError>;
}

/// Sink que acumula payloads en memoria.
#[derive(Debug, Default)]
pub struct MemorySink {
    inner: Mutex<Vec<SubmissionPayload>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<SubmissionPayload> {
        self.inner.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SubmissionSink for MemorySink {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), CoreEngineError> {
        let mut guard = self.inner.lock().map_err(|_| CoreEngineError::Sink("memory sink poisoned".into()))?;
        guard.push(payload.clone());
        Ok(())
    }
}
