//! Sesión asíncrona: une catálogo, motor y sink.
//!
//! La carga del catálogo y la entrega del envío son I/O que se espera; el
//! motor en sí es síncrono. Si el sink falla, la sesión no se reinicia y el
//! visitante puede reintentar con los mismos valores.

use log::warn;

use super::StepEngine;
use crate::errors::CoreEngineError;
use crate::event::{EventStore, InMemoryEventStore};
use crate::model::SubmitOutcome;
use crate::repo::{FieldCatalog, SubmissionSink};

pub struct FormSession<C, S, E = InMemoryEventStore>
    where C: FieldCatalog,
          S: SubmissionSink,
          E: EventStore
{
    catalog: C,
    sink: S,
    engine: StepEngine<E>,
}

impl<C, S> FormSession<C, S>
    where C: FieldCatalog,
          S: SubmissionSink
{
    pub fn new(catalog: C, sink: S) -> Self {
        Self::with_engine(catalog, sink, StepEngine::new())
    }
}

impl<C, S, E> FormSession<C, S, E>
    where C: FieldCatalog,
          S: SubmissionSink,
          E: EventStore
{
    pub fn with_engine(catalog: C, sink: S, engine: StepEngine<E>) -> Self {
        Self { catalog, sink, engine }
    }

    /// Espera el catálogo e inicializa el motor. Devuelve la cantidad de pasos.
    pub async fn load(&mut self) -> Result<usize, CoreEngineError> {
        let fields = self.catalog.load().await?;
        self.engine.initialize(fields)
    }

    pub fn engine(&self) -> &StepEngine<E> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut StepEngine<E> {
        &mut self.engine
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Envío final. La sesión se reinicia sólo si el sink confirma.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, CoreEngineError> {
        let outcome = self.engine.prepare_submission()?;
        if let SubmitOutcome::Accepted(payload) = &outcome {
            if let Err(e) = self.sink.deliver(payload).await {
                warn!("submit:sink_failed session={} error={}", payload.session_id, e);
                return Err(e);
            }
            self.engine.complete_submission(payload)?;
        }
        Ok(outcome)
    }
}
