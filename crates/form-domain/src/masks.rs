//! Máscaras de texto por tipo de campo (nombre, email, teléfono).
//!
//! Todas las máscaras son puntos fijos: aplicar la máscara sobre su propia
//! salida no la modifica.
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("email regex is valid")
});

/// Extrae sólo los dígitos ASCII.
pub fn digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Primera letra de cada palabra en mayúscula, el resto en minúscula.
/// Los espacios se preservan tal cual. Si la mayúscula se expande a varios
/// caracteres (`ß` → `SS`) sólo el primero queda en mayúscula.
pub fn capitalize_name(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut word_start = true;
    for c in input.chars() {
        if c.is_whitespace() {
            out.push(c);
            word_start = true;
        } else if word_start {
            let mut upper = c.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
            word_start = false;
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Minúsculas y descarte de todo carácter fuera de `[a-z0-9._%+-@]`.
pub fn sanitize_email(input: &str) -> String {
    input.to_lowercase()
         .chars()
         .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '%' | '+' | '-' | '@'))
         .collect()
}

pub fn is_valid_email(input: &str) -> bool {
    EMAIL_RE.is_match(input)
}

/// Normaliza a dígitos con código de país. Un número local de 10 u 11
/// dígitos recibe el prefijo; números más largos se asumen ya prefijados.
pub fn normalize_phone(input: &str, country_code: &str) -> String {
    let d = digits(input);
    if (10..=11).contains(&d.len()) {
        format!("{country_code}{d}")
    } else {
        d
    }
}
