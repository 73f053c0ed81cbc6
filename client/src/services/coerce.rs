//! Field coercion applied before writes.
//!
//! Form inputs arrive as loose JSON (often strings). The record store wants
//! typed columns, so numeric and boolean fields are normalized the way the
//! storefront has always done it: lenient leading-number parsing, with a
//! fallback when the result is missing or zero.

#[cfg(test)]
#[path = "coerce_test.rs"]
mod coerce_test;

use serde_json::{Number, Value};

/// How a writable field is normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Coercion {
    /// Decimal number; unparsable or zero becomes `default`. Infinite values
    /// have no JSON form and are sent as `null`.
    Float { default: f64 },
    /// Whole number; unparsable or zero becomes `default`.
    Int { default: i64 },
    /// Truthiness.
    Bool,
    /// Passed through verbatim.
    Text,
}

impl Coercion {
    #[must_use]
    pub fn apply(self, value: &Value) -> Value {
        match self {
            Self::Float { default } => {
                let n = parse_float(value).filter(|n| *n != 0.0 && !n.is_nan()).unwrap_or(default);
                Number::from_f64(n).map_or(Value::Null, Value::Number)
            }
            Self::Int { default } => Value::from(parse_int(value).filter(|n| *n != 0).unwrap_or(default)),
            Self::Bool => Value::Bool(is_truthy(value)),
            Self::Text => value.clone(),
        }
    }
}

/// JavaScript truthiness of a JSON value.
#[must_use]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Leading decimal number of a value, like `parseFloat`.
#[must_use]
pub fn parse_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => None,
    }
}

/// Leading integer of a value, like `parseInt(x, 10)`.
#[must_use]
pub fn parse_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            // Whole-number truncation; out-of-range floats have no integer form.
            #[allow(clippy::cast_possible_truncation)]
            n.as_f64().filter(|f| f.is_finite() && f.abs() < 1e18).map(|f| f.trunc() as i64)
        }),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

fn split_sign(s: &str) -> (&str, &str) {
    match s.as_bytes().first() {
        Some(b'-' | b'+') => s.split_at(1),
        _ => ("", s),
    }
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (sign, rest) = split_sign(s);
    if rest.starts_with("Infinity") {
        return Some(if sign == "-" { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_len = digit_run(rest);
    let int_part = &rest[..int_len];
    let mut tail = &rest[int_len..];
    let mut frac_part = "";
    if let Some(after_dot) = tail.strip_prefix('.') {
        frac_part = &after_dot[..digit_run(after_dot)];
        tail = &after_dot[frac_part.len()..];
    }
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    let mut literal = format!("{sign}{}", if int_part.is_empty() { "0" } else { int_part });
    if !frac_part.is_empty() {
        literal.push('.');
        literal.push_str(frac_part);
    }
    if let Some(exp) = tail.strip_prefix(['e', 'E']) {
        let (exp_sign, exp_rest) = split_sign(exp);
        let exp_digits = &exp_rest[..digit_run(exp_rest)];
        if !exp_digits.is_empty() {
            literal.push('e');
            literal.push_str(exp_sign);
            literal.push_str(exp_digits);
        }
    }
    literal.parse::<f64>().ok()
}

fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = split_sign(s);
    let len = digit_run(rest);
    if len == 0 {
        return None;
    }
    format!("{sign}{}", &rest[..len]).parse::<i64>().ok()
}
