use async_trait::async_trait;
use form_adapters::{AttributionChain, JsonFileCatalog, JsonLinesSink};
use form_core::{CoreEngineError, FieldDefinition, FieldType, FieldValue, FormSession, InMemoryFieldCatalog, StepEngine,
                SubmissionPayload, SubmissionSink};
use leadform_rust::script::{apply_answers, run_scripted, ScriptedOutcome};
use leadform_rust::{AppConfig, AppError};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingSink {
    fingerprints: Mutex<Vec<String>>,
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), CoreEngineError> {
        if let Ok(mut guard) = self.fingerprints.lock() {
            guard.push(payload.fingerprint.clone());
        }
        Ok(())
    }
}

fn catalog() -> Vec<FieldDefinition> {
    vec![FieldDefinition::new("name", FieldType::Name, 0).required(),
         FieldDefinition::new("phone", FieldType::Phone, 1),
         FieldDefinition::division("d1", 2),
         FieldDefinition::new("doc", FieldType::Cpf, 3).required(),
         FieldDefinition::new("topics", FieldType::Checkbox, 4).with_options_csv("A, B")]
}

fn answers(v: Value) -> Map<String, Value> {
    match v {
        Value::Object(m) => m,
        _ => Map::new(),
    }
}

#[test]
fn scripted_run_submits_normalized_values() {
    let mut session = FormSession::new(InMemoryFieldCatalog::new(catalog()), RecordingSink::default());
    let script = answers(json!({
        "name": "maria  clara",
        "phone": "(11) 98765-4321",
        "doc": "52998224725",
        "topics": ["A", "B"]
    }));
    let outcome = tokio_test::block_on(run_scripted(&mut session, &script)).unwrap();
    let ScriptedOutcome::Submitted(payload) = outcome else { panic!("expected submit") };
    assert_eq!(payload.values["name"], FieldValue::from("Maria  Clara"));
    assert_eq!(payload.values["phone"], FieldValue::from("5511987654321"));
    assert_eq!(payload.values["doc"], FieldValue::from("529.982.247-25"));
    assert_eq!(payload.values["topics"], FieldValue::MultiChoice(vec!["A".into(), "B".into()]));
    assert_eq!(session.sink().fingerprints.lock().unwrap().as_slice(), &[payload.fingerprint.clone()]);
    assert_eq!(session.engine().current_step(), Ok(1));
}

#[tokio::test]
async fn scripted_run_stops_at_first_incomplete_step() {
    let mut session = FormSession::new(InMemoryFieldCatalog::new(catalog()), RecordingSink::default());
    let outcome = run_scripted(&mut session, &answers(json!({"name": "ana"}))).await.unwrap();
    assert_eq!(outcome, ScriptedOutcome::Blocked { step: 2, missing: vec!["doc".into()] });
    assert!(session.sink().fingerprints.lock().unwrap().is_empty());

    let blocked = run_scripted(&mut FormSession::new(InMemoryFieldCatalog::new(catalog()), RecordingSink::default()),
                               &Map::new()).await
                                           .unwrap();
    assert_eq!(blocked, ScriptedOutcome::Blocked { step: 1, missing: vec!["name".into()] });
}

#[test]
fn answers_for_other_steps_are_ignored() {
    let mut engine = StepEngine::new();
    engine.initialize(catalog()).unwrap();
    let applied = apply_answers(&mut engine, &answers(json!({"doc": "52998224725", "name": "x"}))).unwrap();
    assert_eq!(applied, 1);
    assert!(engine.value("doc").is_none());
}

#[test]
fn apply_answers_requires_loaded_catalog() {
    let mut engine = StepEngine::new();
    let err = apply_answers(&mut engine, &Map::new()).unwrap_err();
    assert!(matches!(err, AppError::Core(CoreEngineError::CatalogNotLoaded)));
}

#[tokio::test]
async fn scripted_run_against_files() {
    let dir = tempfile::tempdir().unwrap();
    let form = dir.path().join("form.json");
    std::fs::write(&form, r#"[{"id": "email", "type": "email", "order": 0, "required": true}]"#).unwrap();
    let lookup = |k: &str| match k {
        "LEADFORM_CATALOG_PATH" => Some(form.display().to_string()),
        "LEADFORM_SUBMISSIONS_PATH" => Some(dir.path().join("out.jsonl").display().to_string()),
        _ => None,
    };
    let config = AppConfig::from_lookup(lookup);
    let chain = AttributionChain::standard(BTreeMap::new(), None, None, Some("https://f.io/?utm_medium=email".into()));
    let sink = JsonLinesSink::new(&config.submissions_path).with_attribution(chain.capture());
    let mut session = FormSession::new(JsonFileCatalog::new(&config.catalog_path), sink);

    let outcome = run_scripted(&mut session, &answers(json!({"email": " Lead@Mail.com "}))).await.unwrap();
    assert!(matches!(outcome, ScriptedOutcome::Submitted(_)));
    let text = std::fs::read_to_string(&config.submissions_path).unwrap();
    let record: Value = serde_json::from_str(text.trim()).unwrap();
    assert_eq!(record["values"]["email"], "lead@mail.com");
    assert_eq!(record["attribution"]["source"], "page_url");
}
