use form_core::StepEngine;
use form_domain::{FieldDefinition, FieldType};
use serde_json::{json, Value};

fn engine() -> StepEngine {
    let mut engine = StepEngine::new();
    engine.initialize(vec![FieldDefinition::new("name", FieldType::Name, 0),
                           FieldDefinition::new("email", FieldType::Email, 1),
                           FieldDefinition::new("phone", FieldType::Phone, 2),
                           FieldDefinition::new("budget", FieldType::Money, 3),
                           FieldDefinition::new("cnpj", FieldType::Cnpj, 4),
                           FieldDefinition::new("tags", FieldType::Checkbox, 5).with_options_csv("a,b,c")])
          .unwrap();
    engine
}

#[test]
fn set_value_is_a_fixed_point() {
    let mut engine = engine();
    let raws = [json!(null), json!("text"), json!(42), json!(true), json!(["a", "b"]), json!({"x": 1}), json!(1.5)];
    for raw in raws {
        engine.set_value("tags", &raw).unwrap();
        let stored = engine.value("tags").cloned().unwrap();
        engine.set_value("tags", &stored.to_json()).unwrap();
        assert_eq!(engine.value("tags"), Some(&stored), "raw {raw}");
    }
}

#[test]
fn enter_is_a_fixed_point() {
    let mut engine = engine();
    let inputs = [("name", "jOSÉ   carlos"),
                  ("name", "ßa weiß"),
                  ("email", "José@Mail.com"),
                  ("phone", "(11) 98765-4321"),
                  ("budget", "1234567"),
                  ("cnpj", "11222333000181")];
    for (id, raw) in inputs {
        engine.enter(id, raw).unwrap();
        let stored = engine.value(id).and_then(|v| v.as_text()).unwrap().to_string();
        engine.enter(id, &stored).unwrap();
        assert_eq!(engine.value(id).and_then(|v| v.as_text()), Some(stored.as_str()), "field {id}");
    }
    assert_eq!(engine.value("budget").unwrap().to_json(), Value::String("R$ 12.345,67".into()));
    assert_eq!(engine.value("phone").unwrap().to_json(), json!("5511987654321"));
}
