//! Sink de archivo: una línea JSON por envío.

use async_trait::async_trait;
use form_core::{CoreEngineError, SubmissionPayload, SubmissionSink};
use log::info;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::attribution::Attribution;
use crate::encoder::{LeadRecordEncoder, SimpleLeadEncoder};
use crate::AdapterError;

pub struct JsonLinesSink<L = SimpleLeadEncoder>
    where L: LeadRecordEncoder
{
    path: PathBuf,
    encoder: L,
    attribution: Option<Attribution>,
}

impl JsonLinesSink<SimpleLeadEncoder> {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::with_encoder(path, SimpleLeadEncoder)
    }
}

impl<L> JsonLinesSink<L> where L: LeadRecordEncoder
{
    pub fn with_encoder(path: impl AsRef<Path>, encoder: L) -> Self {
        Self { path: path.as_ref().to_path_buf(), encoder, attribution: None }
    }

    /// Atribución que acompaña a todos los envíos de esta sesión.
    pub fn with_attribution(mut self, attribution: Option<Attribution>) -> Self {
        self.attribution = attribution;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, payload: &SubmissionPayload) -> Result<(), AdapterError> {
        let record = self.encoder.encode(payload, self.attribution.as_ref());
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        let mut file = tokio::fs::OpenOptions::new().create(true).append(true).open(&self.path).await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<L> SubmissionSink for JsonLinesSink<L> where L: LeadRecordEncoder
{
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), CoreEngineError> {
        self.append(payload).await.map_err(AdapterError::into_sink_error)?;
        info!("sink:appended path={} fingerprint={}", self.path.display(), payload.fingerprint);
        Ok(())
    }
}
