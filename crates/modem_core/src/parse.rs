//! Conversão de campos numéricos vindos como texto.
//!
//! O modem envia números como strings com espaços à esquerda e, em canais
//! desativados, campos vazios ou placeholders. Falhas viram zero: um campo
//! ruim nunca derruba a normalização dos demais.

use std::str::FromStr;

/// Faz trim e parse de um inteiro; retorna o default (zero) em caso de falha.
pub fn parse_int<T>(text: &str) -> T
where
    T: FromStr + Default,
{
    text.trim().parse().unwrap_or_default()
}

/// Faz trim e parse de um decimal, multiplica por `scale` e trunca em direção
/// ao zero (`"38.983"` com escala 10 → `389`).
pub fn parse_scaled(text: &str, scale: f64) -> i32 {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => (value * scale) as i32,
        _ => 0,
    }
}
