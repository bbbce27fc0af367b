//! Despacho de máscaras por tipo de campo.
//!
//! `apply_mask` recibe el texto crudo tipeado y devuelve el valor enmascarado
//! más un aviso de formato opcional. Los avisos son consultivos: nunca
//! impiden guardar el valor.
use serde::{Deserialize, Serialize};

use crate::documents::{is_valid_cnpj, is_valid_cpf, mask_cnpj, mask_cpf};
use crate::field::{FieldDefinition, FieldType};
use crate::masks::{capitalize_name, is_valid_email, normalize_phone, sanitize_email};
use crate::money::mask_money;

/// Parámetros regionales de las máscaras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskSettings {
    pub currency_symbol: String,
    pub country_code: String,
}

impl Default for MaskSettings {
    fn default() -> Self {
        Self { currency_symbol: "R$".to_string(), country_code: "55".to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatIssue {
    InvalidCpf,
    InvalidCnpj,
    InvalidEmail,
    IncompletePhone,
    AmountClamped,
}

impl FormatIssue {
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidCpf => "CPF inválido",
            Self::InvalidCnpj => "CNPJ inválido",
            Self::InvalidEmail => "Email inválido",
            Self::IncompletePhone => "Teléfono incompleto",
            Self::AmountClamped => "Monto ajustado a los límites del campo",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedInput {
    pub value: String,
    pub issue: Option<FormatIssue>,
}

impl MaskedInput {
    fn plain(value: String) -> Self {
        Self { value, issue: None }
    }

    fn checked(value: String, ok: bool, issue: FormatIssue) -> Self {
        let issue = if value.is_empty() || ok { None } else { Some(issue) };
        Self { value, issue }
    }
}

pub fn apply_mask(field: &FieldDefinition, raw: &str, settings: &MaskSettings) -> MaskedInput {
    match field.field_type {
        FieldType::Name => MaskedInput::plain(capitalize_name(raw)),
        FieldType::Email => {
            let v = sanitize_email(raw);
            let ok = is_valid_email(&v);
            MaskedInput::checked(v, ok, FormatIssue::InvalidEmail)
        }
        FieldType::Cpf => {
            let v = mask_cpf(raw);
            let ok = is_valid_cpf(&v);
            MaskedInput::checked(v, ok, FormatIssue::InvalidCpf)
        }
        FieldType::Cnpj => {
            let v = mask_cnpj(raw);
            let ok = is_valid_cnpj(&v);
            MaskedInput::checked(v, ok, FormatIssue::InvalidCnpj)
        }
        FieldType::Phone => {
            let v = normalize_phone(raw, &settings.country_code);
            let ok = v.len() > 11;
            MaskedInput::checked(v, ok, FormatIssue::IncompletePhone)
        }
        FieldType::Money => {
            let m = mask_money(raw, &settings.currency_symbol, field.money_limits.as_ref());
            MaskedInput::checked(m.text, !m.clamped, FormatIssue::AmountClamped)
        }
        _ => MaskedInput::plain(raw.to_string()),
    }
}
