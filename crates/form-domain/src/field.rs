//! Definición de campos del formulario tal como la entrega el catálogo.
//!
//! Un `FieldDefinition` es de sólo lectura para el motor de pasos. Los campos
//! marcados con `is_division` son separadores de pasos y nunca se renderizan.
use serde::{Deserialize, Deserializer, Serialize};

use crate::money::MoneyLimits;
use crate::DomainError;

/// Tipos de campo soportados por el formulario.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Name,
    Email,
    Phone,
    Textarea,
    Select,
    Checkbox,
    Number,
    Money,
    Cpf,
    Cnpj,
    Address,
    Connection,
    Date,
    Time,
    Datetime,
    Slider,
    Url,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Textarea => "textarea",
            Self::Select => "select",
            Self::Checkbox => "checkbox",
            Self::Number => "number",
            Self::Money => "money",
            Self::Cpf => "cpf",
            Self::Cnpj => "cnpj",
            Self::Address => "address",
            Self::Connection => "connection",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Slider => "slider",
            Self::Url => "url",
        }
    }

    /// Tipos que declaran una lista de opciones.
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Select | Self::Checkbox | Self::Connection)
    }
}

/// Opción de un campo select/checkbox/connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: String,
    pub label: String,
}

impl FieldOption {
    fn from_label(label: &str) -> Self {
        Self { id: label.to_string(), label: label.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    pub id: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    pub order: i64,
    #[serde(default)]
    pub is_division: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default, deserialize_with = "deserialize_options")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money_limits: Option<MoneyLimits>,
}

impl FieldDefinition {
    pub fn new(id: &str, field_type: FieldType, order: i64) -> Self {
        Self { id: id.to_string(),
               field_type,
               label: String::new(),
               order,
               is_division: false,
               required: false,
               options: Vec::new(),
               money_limits: None }
    }

    /// Separador de pasos. Su tipo es irrelevante.
    pub fn division(id: &str, order: i64) -> Self {
        Self { is_division: true, ..Self::new(id, FieldType::Text, order) }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Acepta el formato de etiquetas separadas por comas del catálogo.
    pub fn with_options_csv(mut self, csv: &str) -> Self {
        self.options = parse_csv_options(csv);
        self
    }

    pub fn with_money_limits(mut self, limits: MoneyLimits) -> Self {
        self.money_limits = Some(limits);
        self
    }

    pub fn option_labels(&self) -> Vec<&str> {
        self.options.iter().map(|o| o.label.as_str()).collect()
    }

    /// Chequeos de consistencia de la propia definición.
    pub fn check(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::ValidationError(format!("campo sin id en la posición {}", self.order)));
        }
        if let Some(limits) = &self.money_limits {
            limits.check().map_err(|e| DomainError::ValidationError(format!("{}: {e}", self.id)))?;
        }
        Ok(())
    }
}

fn parse_csv_options(csv: &str) -> Vec<FieldOption> {
    csv.split(',')
       .map(str::trim)
       .filter(|s| !s.is_empty())
       .map(FieldOption::from_label)
       .collect()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOptions {
    Csv(String),
    Pairs(Vec<FieldOption>),
    Labels(Vec<String>),
}

fn deserialize_options<'de, D>(deserializer: D) -> Result<Vec<FieldOption>, D::Error>
    where D: Deserializer<'de>
{
    let raw: Option<RawOptions> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(RawOptions::Csv(s)) => parse_csv_options(&s),
        Some(RawOptions::Pairs(p)) => p,
        Some(RawOptions::Labels(l)) => l.iter().map(|s| FieldOption::from_label(s)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn options_accept_csv_pairs_and_labels() {
        let csv: FieldDefinition = serde_json::from_value(json!({
            "id": "plan", "type": "select", "order": 1, "options": "Basic, Pro ,, Enterprise"
        })).unwrap();
        assert_eq!(csv.option_labels(), vec!["Basic", "Pro", "Enterprise"]);

        let pairs: FieldDefinition = serde_json::from_value(json!({
            "id": "plan", "type": "connection", "order": 1,
            "options": [{"id": "p1", "label": "Basic"}]
        })).unwrap();
        assert_eq!(pairs.options[0].id, "p1");

        let labels: FieldDefinition = serde_json::from_value(json!({
            "id": "plan", "type": "checkbox", "order": 1, "options": ["A", "B"]
        })).unwrap();
        assert_eq!(labels.option_labels(), vec!["A", "B"]);
    }

    #[test]
    fn division_defaults_from_json() {
        let d: FieldDefinition = serde_json::from_value(json!({"id": "div1", "order": 3, "isDivision": true})).unwrap();
        assert!(d.is_division);
        assert!(!d.required);
        assert!(d.options.is_empty());
    }

    #[test]
    fn check_rejects_blank_id() {
        let f = FieldDefinition::new("  ", FieldType::Text, 0);
        assert!(matches!(f.check(), Err(DomainError::ValidationError(_))));
    }
}
