//! Typed scalar values and the cast from raw field text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar cell value.
///
/// Values are produced once (by [`cast`] when a table is loaded, or by the
/// query parser for WHERE literals) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing or empty field
    Null,
    /// 128-bit signed integer
    Integer(i128),
    /// 64-bit floating point number
    Float(f64),
    /// UTF-8 text
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `true` for Integer and Float.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Parse `text` as a base-10 integer, then as a float.
    ///
    /// Returns `None` when neither parse succeeds. Integers that overflow
    /// `i128` fall through to the float parse.
    pub(crate) fn parse_number(text: &str) -> Option<Value> {
        if let Ok(i) = text.parse::<i128>() {
            return Some(Value::Integer(i));
        }
        text.parse::<f64>().ok().map(Value::Float)
    }
}

impl fmt::Display for Value {
    /// Canonical text form.
    ///
    /// Floats always keep a decimal point or an exponent (`5.0`, `1e+20`) so
    /// that casting the text again yields a Float, not an Integer.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write_float(f, *x),
            Value::String(s) => write!(f, "{}", s),
        }
    }
}

/// Shortest round-trip form, with a signed exponent of at least two digits
/// (`1e+16`, `2.5e-05`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    let text = format!("{:?}", x);
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            write!(f, "{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => f.write_str(&text),
    }
}

impl From<i128> for Value {
    fn from(v: i128) -> Self {
        Value::Integer(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(i128::from(v))
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(i128::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// Strip exactly one layer of matching single or double quotes.
///
/// A lone quote character is not considered quoted.
pub(crate) fn strip_quotes(text: &str) -> Option<&str> {
    if text.len() < 2 {
        return None;
    }
    for quote in ['\'', '"'] {
        if text.starts_with(quote) && text.ends_with(quote) {
            return Some(&text[1..text.len() - 1]);
        }
    }
    None
}

/// Cast a raw field from a data file into a typed value.
///
/// Order: empty (after trimming) → Null, integer, float, quoted string with
/// one layer of quotes removed, otherwise the trimmed text.
///
/// # Example
///
/// ```rust
/// use mini_sql::types::{cast, Value};
///
/// assert_eq!(cast(Some(" 42 ")), Value::Integer(42));
/// assert_eq!(cast(Some("")), Value::Null);
/// assert_eq!(cast(Some("'Bob'")), Value::String("Bob".into()));
/// ```
pub fn cast(raw: Option<&str>) -> Value {
    let text = match raw {
        Some(t) => t.trim(),
        None => return Value::Null,
    };
    if text.is_empty() {
        return Value::Null;
    }
    if let Some(number) = Value::parse_number(text) {
        return number;
    }
    match strip_quotes(text) {
        Some(inner) => Value::String(inner.to_string()),
        None => Value::String(text.to_string()),
    }
}
