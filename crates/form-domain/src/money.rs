//! Campos monetarios: los dígitos tipeados se interpretan como centavos.
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::masks::digits;

/// Máximo de dígitos significativos aceptados (cabe holgado en i64).
const MAX_DIGITS: usize = 15;

/// Mayor monto representable con `MAX_DIGITS` dígitos de centavos.
pub fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999_999, 2)
}

/// Límites opcionales configurados en el campo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyLimits {
    #[serde(default)]
    pub min: Option<Decimal>,
    #[serde(default)]
    pub max: Option<Decimal>,
}

impl MoneyLimits {
    pub fn new(min: Option<Decimal>, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    pub fn check(&self) -> Result<(), String> {
        let cap = max_amount();
        for (name, limit) in [("min", self.min), ("max", self.max)] {
            if let Some(v) = limit {
                if v.abs() > cap {
                    return Err(format!("{name} {v} fuera de rango (máximo {cap})"));
                }
            }
        }
        match (self.min, self.max) {
            (Some(min), Some(max)) if min > max => Err(format!("min {min} > max {max}")),
            _ => Ok(()),
        }
    }

    /// Devuelve el monto acotado y si hubo recorte.
    pub fn clamp(&self, amount: Decimal) -> (Decimal, bool) {
        if let Some(max) = self.max {
            if amount > max {
                return (max, true);
            }
        }
        if let Some(min) = self.min {
            if amount < min {
                return (min, true);
            }
        }
        (amount, false)
    }
}

/// Dígitos / 100. `None` si no hay dígitos.
pub fn amount_from_digits(input: &str) -> Option<Decimal> {
    let d = digits(input);
    let significant = d.trim_start_matches('0');
    if d.is_empty() {
        return None;
    }
    let kept = &significant[..significant.len().min(MAX_DIGITS)];
    let cents: i64 = if kept.is_empty() { 0 } else { kept.parse().ok()? };
    Some(Decimal::new(cents, 2))
}

/// Formato `R$ 1.234,56`: miles con punto, decimales con coma.
pub fn format_money(amount: Decimal, symbol: &str) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let abs = rounded.abs();
    let int_part = abs.trunc().normalize().to_string();
    // fract < 1, así que los centavos siempre caben en u32
    let cents = abs.fract().checked_mul(Decimal::ONE_HUNDRED).and_then(|c| c.to_u32()).unwrap_or(0);
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{sign}{symbol} {grouped},{cents:02}")
}

/// Resultado de enmascarar un campo monetario.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedMoney {
    pub text: String,
    pub clamped: bool,
}

pub fn mask_money(input: &str, symbol: &str, limits: Option<&MoneyLimits>) -> MaskedMoney {
    let Some(amount) = amount_from_digits(input) else {
        return MaskedMoney { text: String::new(), clamped: false };
    };
    let (amount, clamped) = match limits {
        Some(l) => l.clamp(amount),
        None => (amount, false),
    };
    MaskedMoney { text: format_money(amount, symbol), clamped }
}
