//! Core StepEngine implementation

use form_domain::{apply_mask, FieldDefinition, FormatIssue, MaskSettings};
use indexmap::IndexMap;
use log::{debug, info};
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap, HashSet};
use uuid::Uuid;

use crate::constants::{ENGINE_VERSION, REQUIRED_MESSAGE};
use crate::errors::CoreEngineError;
use crate::event::{EventStore, InMemoryEventStore, SessionEvent, SessionEventKind};
use crate::hashing::hash_value;
use crate::model::{ErrorMap, FieldValue, SubmissionPayload, SubmitOutcome, ValidationResult};
use crate::step::{StepPartition, StepState};

#[derive(Debug)]
struct LoadedCatalog {
    partition: StepPartition,
    state: StepState,
    catalog_hash: String,
}

/// Motor de pasos de un formulario.
///
/// Una instancia por sesión de visitante. Mantiene el particionado del
/// catálogo, el paso actual, los valores de campo y el mapa de errores de
/// campos obligatorios. No sabe nada de presentación: el renderer consulta
/// `fields_for_step`, `errors` y `hints` en modo lectura.
#[derive(Debug)]
pub struct StepEngine<E = InMemoryEventStore>
    where E: EventStore
{
    session_id: Uuid,
    event_store: E,
    settings: MaskSettings,
    catalog: Option<LoadedCatalog>,
    values: HashMap<String, FieldValue>,
    errors: ErrorMap,
    hints: BTreeMap<String, FormatIssue>,
}

impl StepEngine<InMemoryEventStore> {
    /// Crea un motor con store de eventos en memoria.
    pub fn new() -> Self {
        Self::new_with_store(InMemoryEventStore::default())
    }
}

impl Default for StepEngine<InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

fn catalog_hash(partition: &StepPartition) -> String {
    let fields: Vec<Value> = partition.fields()
                                      .iter()
                                      .map(|f| {
                                          json!({
                                              "id": f.id,
                                              "type": f.field_type.as_str(),
                                              "division": f.is_division,
                                              "required": f.required,
                                          })
                                      })
                                      .collect();
    hash_value(&json!({ "engine_version": ENGINE_VERSION, "fields": fields }))
}

fn missing_required<'a, I>(fields: I, values: &HashMap<String, FieldValue>) -> Vec<String>
    where I: IntoIterator<Item = &'a FieldDefinition>
{
    fields.into_iter()
          .filter(|f| f.required && !f.is_division)
          .filter(|f| values.get(&f.id).map_or(true, FieldValue::is_blank))
          .map(|f| f.id.clone())
          .collect()
}

impl<E> StepEngine<E> where E: EventStore
{
    pub fn new_with_store(event_store: E) -> Self {
        Self { session_id: Uuid::new_v4(),
               event_store,
               settings: MaskSettings::default(),
               catalog: None,
               values: HashMap::new(),
               errors: ErrorMap::new(),
               hints: BTreeMap::new() }
    }

    /// Fija los parámetros regionales de las máscaras.
    pub fn with_settings(mut self, settings: MaskSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn settings(&self) -> &MaskSettings {
        &self.settings
    }

    fn loaded(&self) -> Result<&LoadedCatalog, CoreEngineError> {
        self.catalog.as_ref().ok_or(CoreEngineError::CatalogNotLoaded)
    }

    /// Carga el catálogo y calcula los pasos. Una sola vez por sesión:
    /// `total_steps` no puede cambiar con la sesión en curso.
    pub fn initialize(&mut self, fields: Vec<FieldDefinition>) -> Result<usize, CoreEngineError> {
        if self.catalog.is_some() {
            return Err(CoreEngineError::CatalogAlreadyLoaded);
        }
        let mut seen = HashSet::new();
        for f in &fields {
            f.check().map_err(|e| CoreEngineError::InvalidDefinition(e.to_string()))?;
            if !seen.insert(f.id.as_str()) {
                return Err(CoreEngineError::DuplicateField(f.id.clone()));
            }
        }
        let partition = StepPartition::new(fields);
        let total = partition.total_steps();
        let hash = catalog_hash(&partition);
        self.event_store.append_kind(self.session_id,
                                     SessionEventKind::SessionInitialized { catalog_hash: hash.clone(),
                                                                            total_steps: total });
        info!("session:initialized session={} total_steps={} fields={}",
              self.session_id,
              total,
              partition.fields().len());
        self.catalog = Some(LoadedCatalog { partition, state: StepState::new(total), catalog_hash: hash });
        Ok(total)
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn total_steps(&self) -> Result<usize, CoreEngineError> {
        Ok(self.loaded()?.state.total())
    }

    pub fn current_step(&self) -> Result<usize, CoreEngineError> {
        Ok(self.loaded()?.state.current())
    }

    pub fn catalog_hash(&self) -> Result<&str, CoreEngineError> {
        Ok(&self.loaded()?.catalog_hash)
    }

    pub fn fields_for_step(&self, step: usize) -> Result<&[FieldDefinition], CoreEngineError> {
        self.loaded()?.partition.fields_for_step(step)
    }

    /// Campos del paso actual.
    pub fn current_fields(&self) -> Result<&[FieldDefinition], CoreEngineError> {
        let loaded = self.loaded()?;
        loaded.partition.fields_for_step(loaded.state.current())
    }

    fn step_of(&self, field_id: &str) -> Result<usize, CoreEngineError> {
        self.loaded()?
            .partition
            .step_of(field_id)
            .ok_or_else(|| CoreEngineError::UnknownField(field_id.to_string()))
    }

    fn store_value(&mut self, field_id: &str, value: FieldValue, step: usize) {
        if !value.is_blank() {
            self.errors.remove(field_id);
        }
        self.values.insert(field_id.to_string(), value);
        self.event_store.append_kind(self.session_id,
                                     SessionEventKind::ValueSet { field_id: field_id.to_string(), step });
    }

    /// Guarda un valor crudo aplicando la canonicalización de `FieldValue`.
    pub fn set_value(&mut self, field_id: &str, raw: &Value) -> Result<(), CoreEngineError> {
        let step = self.step_of(field_id)?;
        self.hints.remove(field_id);
        self.store_value(field_id, FieldValue::from_raw(raw), step);
        Ok(())
    }

    /// Entrada de texto tipeada: aplica la máscara del tipo de campo, guarda
    /// el resultado y registra el aviso de formato (consultivo).
    pub fn enter(&mut self, field_id: &str, raw: &str) -> Result<Option<FormatIssue>, CoreEngineError> {
        let step = self.step_of(field_id)?;
        let masked = {
            let field = self.loaded()?
                            .partition
                            .get(field_id)
                            .ok_or_else(|| CoreEngineError::UnknownField(field_id.to_string()))?;
            apply_mask(field, raw, &self.settings)
        };
        match masked.issue {
            Some(issue) => {
                debug!("enter:hint session={} field={} issue={:?}", self.session_id, field_id, issue);
                self.hints.insert(field_id.to_string(), issue);
            }
            None => {
                self.hints.remove(field_id);
            }
        }
        self.store_value(field_id, FieldValue::Text(masked.value), step);
        Ok(masked.issue)
    }

    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn hints(&self) -> &BTreeMap<String, FormatIssue> {
        &self.hints
    }

    /// Actualiza el mapa de errores sólo para los campos evaluados; los
    /// errores de otros pasos quedan como estaban.
    fn apply_errors(&mut self, evaluated: &[String], missing: &[String]) {
        for id in evaluated {
            if missing.contains(id) {
                self.errors.insert(id.clone(), REQUIRED_MESSAGE.to_string());
            } else {
                self.errors.remove(id);
            }
        }
    }

    /// Valida los obligatorios de un paso.
    pub fn validate_step(&mut self, step: usize) -> Result<ValidationResult, CoreEngineError> {
        let (evaluated, missing) = {
            let loaded = self.catalog.as_ref().ok_or(CoreEngineError::CatalogNotLoaded)?;
            let fields = loaded.partition.fields_for_step(step)?;
            let evaluated: Vec<String> = fields.iter().map(|f| f.id.clone()).collect();
            (evaluated, missing_required(fields, &self.values))
        };
        self.apply_errors(&evaluated, &missing);
        self.event_store.append_kind(self.session_id,
                                     SessionEventKind::StepValidated { step, missing: missing.clone() });
        Ok(ValidationResult::from_missing(missing))
    }

    /// Valida el paso actual y, si pasa, avanza uno (tope: último paso).
    pub fn advance(&mut self) -> Result<ValidationResult, CoreEngineError> {
        let from = self.current_step()?;
        let result = self.validate_step(from)?;
        if !result.is_valid {
            debug!("advance:blocked session={} step={} missing={:?}",
                   self.session_id,
                   from,
                   result.missing_field_ids);
            return Ok(result);
        }
        let loaded = self.catalog.as_mut().ok_or(CoreEngineError::CatalogNotLoaded)?;
        if loaded.state.advance() {
            let to = loaded.state.current();
            self.event_store.append_kind(self.session_id, SessionEventKind::StepAdvanced { from, to });
            debug!("advance:done session={} from={} to={}", self.session_id, from, to);
        }
        Ok(result)
    }

    /// Barrido completo de obligatorios y armado del payload, sin cerrar la
    /// sesión. El llamador confirma con `complete_submission` cuando el
    /// sink aceptó el envío.
    pub fn prepare_submission(&mut self) -> Result<SubmitOutcome, CoreEngineError> {
        let (evaluated, missing) = {
            let loaded = self.loaded()?;
            if !loaded.state.is_last() {
                return Err(CoreEngineError::NotOnLastStep { current: loaded.state.current(),
                                                            total: loaded.state.total() });
            }
            let evaluated: Vec<String> = loaded.partition.renderable().map(|f| f.id.clone()).collect();
            (evaluated, missing_required(loaded.partition.renderable(), &self.values))
        };
        self.apply_errors(&evaluated, &missing);
        if !missing.is_empty() {
            debug!("submit:rejected session={} missing={:?}", self.session_id, missing);
            self.event_store.append_kind(self.session_id,
                                         SessionEventKind::SubmissionRejected { missing: missing.clone() });
            return Ok(SubmitOutcome::Rejected(ValidationResult::from_missing(missing)));
        }
        let values: IndexMap<String, FieldValue> =
            evaluated.into_iter()
                     .map(|id| {
                         let v = self.values.get(&id).cloned().unwrap_or_default();
                         (id, v)
                     })
                     .collect();
        let hash = self.loaded()?.catalog_hash.clone();
        Ok(SubmitOutcome::Accepted(SubmissionPayload::new(self.session_id, hash, values)))
    }

    /// Registra el envío aceptado y reinicia la sesión.
    pub fn complete_submission(&mut self, payload: &SubmissionPayload) -> Result<(), CoreEngineError> {
        if payload.session_id != self.session_id {
            return Err(CoreEngineError::Internal(format!("payload belongs to session {}", payload.session_id)));
        }
        self.event_store.append_kind(self.session_id,
                                     SessionEventKind::SubmissionAccepted { fingerprint: payload.fingerprint.clone() });
        info!("submit:accepted session={} fingerprint={}", self.session_id, payload.fingerprint);
        self.reset_session()
    }

    /// Envío final: sólo en el último paso. Revalida todo el catálogo.
    pub fn submit(&mut self) -> Result<SubmitOutcome, CoreEngineError> {
        let outcome = self.prepare_submission()?;
        if let SubmitOutcome::Accepted(payload) = &outcome {
            self.complete_submission(payload)?;
        }
        Ok(outcome)
    }

    /// Reinicia valores, errores y paso sin recargar el catálogo.
    pub fn restart(&mut self) -> Result<(), CoreEngineError> {
        self.loaded()?;
        self.reset_session()
    }

    fn reset_session(&mut self) -> Result<(), CoreEngineError> {
        self.event_store.append_kind(self.session_id, SessionEventKind::SessionReset);
        self.values.clear();
        self.errors.clear();
        self.hints.clear();
        self.session_id = Uuid::new_v4();
        let loaded = self.catalog.as_mut().ok_or(CoreEngineError::CatalogNotLoaded)?;
        loaded.state.reset();
        self.event_store.append_kind(self.session_id,
                                     SessionEventKind::SessionInitialized { catalog_hash: loaded.catalog_hash.clone(),
                                                                            total_steps: loaded.state.total() });
        Ok(())
    }

    /// Eventos de la sesión actual.
    pub fn events(&self) -> Vec<SessionEvent> {
        self.event_store.list(self.session_id)
    }

    pub fn events_for(&self, session_id: Uuid) -> Vec<SessionEvent> {
        self.event_store.list(session_id)
    }

    /// Secuencia compacta de códigos de evento de la sesión actual.
    pub fn event_codes(&self) -> Vec<&'static str> {
        self.events().iter().map(|e| e.kind.code()).collect()
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }
}
