//! Documentos brasileños: CPF (personas) y CNPJ (empresas).
//!
//! Ambos usan dos dígitos verificadores módulo 11. Las máscaras son
//! progresivas: se aplican sobre lo que el visitante lleva tipeado.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::masks::digits;
use crate::DomainError;

pub const CPF_LEN: usize = 11;
pub const CNPJ_LEN: usize = 14;

fn to_numbers(d: &str) -> Vec<u32> {
    d.chars().filter_map(|c| c.to_digit(10)).collect()
}

fn all_same(nums: &[u32]) -> bool {
    nums.windows(2).all(|w| w[0] == w[1])
}

/// Inserta separadores en las posiciones indicadas (índice del dígito que
/// los sigue).
fn progressive_mask(d: &str, max: usize, seps: &[(usize, char)]) -> String {
    let mut out = String::with_capacity(max + seps.len());
    for (i, c) in d.chars().take(max).enumerate() {
        if let Some((_, sep)) = seps.iter().find(|(pos, _)| *pos == i) {
            out.push(*sep);
        }
        out.push(c);
    }
    out
}

/// `NNN.NNN.NNN-NN`
pub fn mask_cpf(input: &str) -> String {
    progressive_mask(&digits(input), CPF_LEN, &[(3, '.'), (6, '.'), (9, '-')])
}

/// `NN.NNN.NNN/NNNN-NN`
pub fn mask_cnpj(input: &str) -> String {
    progressive_mask(&digits(input), CNPJ_LEN, &[(2, '.'), (5, '.'), (8, '/'), (12, '-')])
}

fn cpf_check_digit(nums: &[u32]) -> u32 {
    let first_weight = nums.len() as u32 + 1;
    let sum: u32 = nums.iter().enumerate().map(|(i, n)| n * (first_weight - i as u32)).sum();
    let r = (sum * 10) % 11;
    if r == 10 { 0 } else { r }
}

fn cnpj_check_digit(nums: &[u32]) -> u32 {
    // pesos cíclicos 2..9 desde la derecha
    let sum: u32 = nums.iter().rev().enumerate().map(|(i, n)| n * (2 + (i as u32 % 8))).sum();
    let r = sum % 11;
    if r < 2 { 0 } else { 11 - r }
}

pub fn is_valid_cpf(input: &str) -> bool {
    let nums = to_numbers(&digits(input));
    if nums.len() != CPF_LEN || all_same(&nums) {
        return false;
    }
    cpf_check_digit(&nums[..9]) == nums[9] && cpf_check_digit(&nums[..10]) == nums[10]
}

pub fn is_valid_cnpj(input: &str) -> bool {
    let nums = to_numbers(&digits(input));
    if nums.len() != CNPJ_LEN || all_same(&nums) {
        return false;
    }
    cnpj_check_digit(&nums[..12]) == nums[12] && cnpj_check_digit(&nums[..13]) == nums[13]
}

/// CPF validado, guardado con máscara.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cpf(String);

impl Cpf {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if !is_valid_cpf(input) {
            return Err(DomainError::InvalidDocument { kind: "cpf", value: input.to_string() });
        }
        Ok(Cpf(mask_cpf(input)))
    }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn digits(&self) -> String { digits(&self.0) }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// CNPJ validado, guardado con máscara.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cnpj(String);

impl Cnpj {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if !is_valid_cnpj(input) {
            return Err(DomainError::InvalidDocument { kind: "cnpj", value: input.to_string() });
        }
        Ok(Cnpj(mask_cnpj(input)))
    }
    pub fn as_str(&self) -> &str { &self.0 }
    pub fn digits(&self) -> String { digits(&self.0) }
}

impl fmt::Display for Cnpj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_check_digits() {
        assert!(is_valid_cpf("52998224725"));
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(!is_valid_cpf("52998224724"));
        assert!(!is_valid_cpf("11111111111"));
        assert!(!is_valid_cpf("00000000000"));
        assert!(!is_valid_cpf("5299822472"));
        assert!(!is_valid_cpf("529982247251"));
    }

    #[test]
    fn cnpj_check_digits() {
        assert!(is_valid_cnpj("11222333000181"));
        assert!(is_valid_cnpj("11.222.333/0001-81"));
        assert!(!is_valid_cnpj("11222333000182"));
        assert!(!is_valid_cnpj("11222333000191"));
        assert!(!is_valid_cnpj("22222222222222"));
    }

    #[test]
    fn masks_are_progressive() {
        assert_eq!(mask_cpf("529"), "529");
        assert_eq!(mask_cpf("5299"), "529.9");
        assert_eq!(mask_cpf("5299822472599"), "529.982.247-25");
        assert_eq!(mask_cnpj("11222333000181"), "11.222.333/0001-81");
        assert_eq!(mask_cnpj("112223330"), "11.222.333/0");
        let once = mask_cnpj("11222");
        assert_eq!(mask_cnpj(&once), once);
    }

    #[test]
    fn value_objects_keep_masked_form() {
        let cpf = Cpf::parse("52998224725").unwrap();
        assert_eq!(cpf.as_str(), "529.982.247-25");
        assert_eq!(cpf.digits(), "52998224725");
        assert!(Cnpj::parse("11.222.333/0001-80").is_err());
    }
}
