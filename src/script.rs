//! Recorrido guionado de un formulario: aplica respuestas predefinidas paso
//! a paso, como lo haría un usuario, y envía al llegar al último paso.
use form_core::{EventStore, FieldCatalog, FormSession, StepEngine, SubmissionPayload, SubmissionSink, SubmitOutcome};
use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::AppError;

/// Resultado de un recorrido guionado.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptedOutcome {
    Submitted(SubmissionPayload),
    /// El recorrido se detuvo en `step` porque faltan obligatorios.
    Blocked { step: usize, missing: Vec<String> },
}

/// Aplica las respuestas que corresponden a campos del paso actual.
///
/// Los textos pasan por la máscara del tipo (`enter`); los demás valores
/// (booleanos, listas) se guardan tal cual. Devuelve cuántos se aplicaron.
pub fn apply_answers<E>(engine: &mut StepEngine<E>, answers: &Map<String, Value>) -> Result<usize, AppError>
    where E: EventStore
{
    let ids: Vec<String> = engine.current_fields()?.iter().filter(|f| !f.is_division).map(|f| f.id.clone()).collect();
    let mut applied = 0;
    for id in ids {
        let Some(raw) = answers.get(&id) else { continue };
        match raw {
            Value::String(text) => {
                if let Some(issue) = engine.enter(&id, text)? {
                    warn!("script:hint field={} issue={}", id, issue.message());
                }
            }
            other => engine.set_value(&id, other)?,
        }
        applied += 1;
    }
    debug!("script:applied step={} count={}", engine.current_step()?, applied);
    Ok(applied)
}

/// Carga el catálogo, recorre todos los pasos y envía.
pub async fn run_scripted<C, S, E>(session: &mut FormSession<C, S, E>,
                                   answers: &Map<String, Value>)
                                   -> Result<ScriptedOutcome, AppError>
    where C: FieldCatalog,
          S: SubmissionSink,
          E: EventStore
{
    if !session.engine().is_loaded() {
        session.load().await?;
    }
    loop {
        let engine = session.engine_mut();
        apply_answers(engine, answers)?;
        let step = engine.current_step()?;
        if step == engine.total_steps()? {
            break;
        }
        let result = engine.advance()?;
        if !result.is_valid {
            info!("script:blocked step={} missing={:?}", step, result.missing_field_ids);
            return Ok(ScriptedOutcome::Blocked { step, missing: result.missing_field_ids });
        }
    }
    let step = session.engine().current_step()?;
    match session.submit().await? {
        SubmitOutcome::Accepted(payload) => Ok(ScriptedOutcome::Submitted(payload)),
        SubmitOutcome::Rejected(result) => Ok(ScriptedOutcome::Blocked { step, missing: result.missing_field_ids }),
    }
}
