//! Valor de un campo: unión cerrada de texto, bandera y selección múltiple.
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
    MultiChoice(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::empty()
    }
}

impl FieldValue {
    /// Vacío canónico: `Text("")`, nunca null.
    pub fn empty() -> Self {
        FieldValue::Text(String::new())
    }

    /// Canonicaliza un valor crudo. Orden de prioridad:
    /// null → `""`; array → selección múltiple; objeto → `""`; bool → bandera;
    /// string/número → texto.
    pub fn from_raw(raw: &Value) -> Self {
        match raw {
            Value::Null => FieldValue::empty(),
            Value::Array(items) => FieldValue::MultiChoice(items.iter()
                                                               .map(|v| match v {
                                                                   Value::String(s) => s.clone(),
                                                                   other => other.to_string(),
                                                               })
                                                               .collect()),
            Value::Object(_) => FieldValue::empty(),
            Value::Bool(b) => FieldValue::Flag(*b),
            Value::String(s) => FieldValue::Text(s.clone()),
            Value::Number(n) => FieldValue::Text(n.to_string()),
        }
    }

    /// Vacío a efectos de campos obligatorios: texto en blanco, lista vacía
    /// o bandera desmarcada.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Flag(b) => !b,
            FieldValue::MultiChoice(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::Text(s) => Value::String(s.clone()),
            FieldValue::Flag(b) => Value::Bool(*b),
            FieldValue::MultiChoice(v) => Value::Array(v.iter().cloned().map(Value::String).collect()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self { FieldValue::Text(s.to_string()) }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self { FieldValue::Text(s) }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self { FieldValue::Flag(b) }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self { FieldValue::MultiChoice(v) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn canonicalization_priority() {
        assert_eq!(FieldValue::from_raw(&Value::Null), FieldValue::empty());
        assert_eq!(FieldValue::from_raw(&json!({"a": 1})), FieldValue::empty());
        assert_eq!(FieldValue::from_raw(&json!(["a", 2])), FieldValue::MultiChoice(vec!["a".into(), "2".into()]));
        assert_eq!(FieldValue::from_raw(&json!(true)), FieldValue::Flag(true));
        assert_eq!(FieldValue::from_raw(&json!(12.5)), FieldValue::Text("12.5".into()));
        assert_eq!(FieldValue::from_raw(&json!("x")), FieldValue::Text("x".into()));
    }

    #[test]
    fn blank_detection() {
        assert!(FieldValue::from("   ").is_blank());
        assert!(FieldValue::MultiChoice(vec![]).is_blank());
        assert!(FieldValue::Flag(false).is_blank());
        assert!(!FieldValue::from("a").is_blank());
    }

    #[test]
    fn untagged_serde_shape() {
        let v = serde_json::to_value(FieldValue::MultiChoice(vec!["a".into()])).unwrap();
        assert_eq!(v, json!(["a"]));
        let back: FieldValue = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(back, FieldValue::Flag(false));
    }
}
