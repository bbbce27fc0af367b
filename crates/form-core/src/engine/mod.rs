//! Engine module: `StepEngine` (síncrono, una instancia por sesión) y
//! `FormSession` (borde asíncrono con catálogo y sink).

pub mod core;
pub mod session;

pub use core::StepEngine;
pub use session::FormSession;

pub use crate::event::{EventStore, InMemoryEventStore, SessionEvent, SessionEventKind};
pub use crate::model::{FieldValue, SubmitOutcome, ValidationResult};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CoreEngineError;
    use form_domain::{FieldDefinition, FieldType, FormatIssue};
    use serde_json::json;

    fn two_step_catalog() -> Vec<FieldDefinition> {
        vec![FieldDefinition::new("name", FieldType::Name, 0).required(),
             FieldDefinition::new("email", FieldType::Email, 1),
             FieldDefinition::division("div", 2),
             FieldDefinition::new("doc", FieldType::Cpf, 3).required()]
    }

    #[test]
    fn operations_before_initialize_fail_fast() {
        let mut engine = StepEngine::new();
        assert_eq!(engine.fields_for_step(1), Err(CoreEngineError::CatalogNotLoaded));
        assert_eq!(engine.set_value("name", &json!("x")), Err(CoreEngineError::CatalogNotLoaded));
        assert_eq!(engine.advance(), Err(CoreEngineError::CatalogNotLoaded));
        assert!(!engine.is_loaded());
    }

    #[test]
    fn initialize_only_once_and_rejects_duplicates() {
        let mut engine = StepEngine::new();
        assert_eq!(engine.initialize(two_step_catalog()), Ok(2));
        assert_eq!(engine.initialize(two_step_catalog()), Err(CoreEngineError::CatalogAlreadyLoaded));

        let mut dup = StepEngine::new();
        let fields = vec![FieldDefinition::new("a", FieldType::Text, 0),
                          FieldDefinition::new("a", FieldType::Text, 1)];
        assert_eq!(dup.initialize(fields), Err(CoreEngineError::DuplicateField("a".into())));
    }

    #[test]
    fn unknown_and_division_fields_are_not_writable() {
        let mut engine = StepEngine::new();
        engine.initialize(two_step_catalog()).unwrap();
        assert_eq!(engine.set_value("nope", &json!("x")), Err(CoreEngineError::UnknownField("nope".into())));
        assert_eq!(engine.set_value("div", &json!("x")), Err(CoreEngineError::UnknownField("div".into())));
    }

    #[test]
    fn enter_masks_and_records_hints() {
        let mut engine = StepEngine::new();
        engine.initialize(two_step_catalog()).unwrap();
        assert_eq!(engine.enter("name", "ana MARIA").unwrap(), None);
        assert_eq!(engine.value("name"), Some(&FieldValue::from("Ana Maria")));

        assert_eq!(engine.enter("doc", "52998224724").unwrap(), Some(FormatIssue::InvalidCpf));
        assert_eq!(engine.hints().get("doc"), Some(&FormatIssue::InvalidCpf));
        assert_eq!(engine.value("doc"), Some(&FieldValue::from("529.982.247-24")));

        engine.enter("doc", "52998224725").unwrap();
        assert!(engine.hints().get("doc").is_none());
    }

    #[test]
    fn set_value_clears_stale_hint() {
        let mut engine = StepEngine::new();
        engine.initialize(two_step_catalog()).unwrap();
        engine.enter("doc", "52998224724").unwrap();
        assert_eq!(engine.hints().get("doc"), Some(&FormatIssue::InvalidCpf));
        engine.set_value("doc", &json!("529.982.247-25")).unwrap();
        assert!(engine.hints().get("doc").is_none());
    }

    #[test]
    fn blank_values_keep_required_error() {
        let mut engine = StepEngine::new();
        engine.initialize(vec![FieldDefinition::new("name", FieldType::Text, 0).required(),
                               FieldDefinition::new("tags", FieldType::Checkbox, 1).required()
                                                                                   .with_options_csv("a,b"),
                               FieldDefinition::new("ok", FieldType::Checkbox, 2).required()])
              .unwrap();
        assert!(!engine.advance().unwrap().is_valid);
        assert_eq!(engine.errors().len(), 3);

        engine.set_value("name", &json!("   ")).unwrap();
        engine.set_value("tags", &json!([])).unwrap();
        engine.set_value("ok", &json!(false)).unwrap();
        let ids: Vec<&str> = engine.errors().keys().map(|k| k.as_str()).collect();
        assert_eq!(ids, vec!["name", "ok", "tags"]);

        engine.set_value("name", &json!("x")).unwrap();
        engine.set_value("tags", &json!(["a"])).unwrap();
        engine.set_value("ok", &json!(true)).unwrap();
        assert!(engine.errors().is_empty());
    }

    #[test]
    fn money_limits_out_of_range_are_rejected_at_initialize() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "id": "budget", "type": "money", "order": 0,
            "moneyLimits": {"min": 100_000_000_000_000_000_u64}
        })).unwrap();
        let mut engine = StepEngine::new();
        assert!(matches!(engine.initialize(vec![field]), Err(CoreEngineError::InvalidDefinition(_))));
        assert!(!engine.is_loaded());
    }

    #[test]
    fn money_entry_at_the_upper_limit_is_exact() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "id": "budget", "type": "money", "order": 0,
            "moneyLimits": {"min": 9_999_999_999_999_u64}
        })).unwrap();
        let mut engine = StepEngine::new();
        engine.initialize(vec![field]).unwrap();
        assert_eq!(engine.enter("budget", "1").unwrap(), Some(FormatIssue::AmountClamped));
        assert_eq!(engine.value("budget"), Some(&FieldValue::from("R$ 9.999.999.999.999,00")));
    }

    #[test]
    fn format_hints_do_not_block_navigation() {
        let mut engine = StepEngine::new();
        engine.initialize(two_step_catalog()).unwrap();
        engine.enter("name", "ana").unwrap();
        engine.enter("email", "not-an-email").unwrap();
        assert!(engine.advance().unwrap().is_valid);
        assert_eq!(engine.current_step(), Ok(2));
    }

    #[test]
    fn submit_before_last_step_is_rejected() {
        let mut engine = StepEngine::new();
        engine.initialize(two_step_catalog()).unwrap();
        assert_eq!(engine.submit(), Err(CoreEngineError::NotOnLastStep { current: 1, total: 2 }));
    }

    #[test]
    fn accepted_submit_resets_session() {
        let mut engine = StepEngine::new();
        engine.initialize(two_step_catalog()).unwrap();
        let first_session = engine.session_id();
        engine.enter("name", "ana").unwrap();
        engine.advance().unwrap();
        engine.enter("doc", "52998224725").unwrap();

        let outcome = engine.submit().unwrap();
        let SubmitOutcome::Accepted(payload) = outcome else { panic!("expected accepted") };
        assert_eq!(payload.session_id, first_session);
        let keys: Vec<&str> = payload.values.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["name", "email", "doc"]);
        assert_eq!(payload.values["email"], FieldValue::empty());

        assert_ne!(engine.session_id(), first_session);
        assert_eq!(engine.current_step(), Ok(1));
        assert!(engine.value("name").is_none());
        assert_eq!(engine.event_codes(), vec!["I"]);

        let old: Vec<&str> = engine.events_for(first_session).iter().map(|e| e.kind.code()).collect();
        assert_eq!(old.last(), Some(&"R"));
        assert!(old.contains(&"S"));
    }
}
