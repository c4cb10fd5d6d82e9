//! WHERE predicates and typed value comparison.

use crate::types::{EngineError, Result, Row, Value};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Gte,
    /// `<=`
    Lte,
}

impl Operator {
    /// Operator symbols in match order: `=` before `!=`, two-character
    /// forms before their one-character prefixes.
    pub const SYMBOLS: [(&'static str, Operator); 6] = [
        ("=", Operator::Eq),
        ("!=", Operator::Ne),
        (">=", Operator::Gte),
        ("<=", Operator::Lte),
        (">", Operator::Gt),
        ("<", Operator::Lt),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Gte => ">=",
            Self::Lte => "<=",
        }
    }

    /// Longest operator symbol at the start of `text`, with its length.
    pub fn match_prefix(text: &str) -> Option<(Operator, usize)> {
        Self::SYMBOLS
            .iter()
            .find(|(sym, _)| text.starts_with(sym))
            .map(|(sym, op)| (*op, sym.len()))
    }

    /// Whether an ordering satisfies this operator.
    ///
    /// `None` (unordered, e.g. NaN) only satisfies `!=`.
    fn accepts(&self, ordering: Option<Ordering>) -> bool {
        match self {
            Self::Eq => ordering == Some(Ordering::Equal),
            Self::Ne => ordering != Some(Ordering::Equal),
            Self::Gt => ordering == Some(Ordering::Greater),
            Self::Lt => ordering == Some(Ordering::Less),
            Self::Gte => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            Self::Lte => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single `column operator literal` condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub column: String,
    pub operator: Operator,
    pub literal: Value,
}

impl Predicate {
    pub fn new(column: impl Into<String>, operator: Operator, literal: Value) -> Self {
        Self {
            column: column.into(),
            operator,
            literal,
        }
    }

    /// Evaluate the predicate against a row.
    ///
    /// # Errors
    ///
    /// `EngineError::ColumnNotFound` if the row has no such column,
    /// `EngineError::TypeComparison` if the operands cannot be compared.
    pub fn evaluate(&self, row: &Row) -> Result<bool> {
        let left = row
            .get(&self.column)
            .ok_or_else(|| EngineError::column_not_found(&self.column))?;
        compare(left, self.operator, &self.literal)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Value::String(s) => write!(f, "{} {} '{}'", self.column, self.operator, s),
            other => write!(f, "{} {} {}", self.column, self.operator, other),
        }
    }
}

/// Compare two values with SQL-ish semantics.
///
/// - Null left operand: `=` tests the right side for Null, `!=` for non-Null,
///   ordering operators are `false`.
/// - Both numeric: numeric comparison, Integer/Float compared exactly.
/// - Otherwise both sides compare as their canonical text.
///
/// # Errors
///
/// `EngineError::TypeComparison` when a non-Null left operand meets a Null
/// right operand, which has no textual form to compare against.
pub fn compare(left: &Value, op: Operator, right: &Value) -> Result<bool> {
    match (left, right) {
        (Value::Null, _) => Ok(match op {
            Operator::Eq => right.is_null(),
            Operator::Ne => !right.is_null(),
            _ => false,
        }),
        (_, Value::Null) => Err(EngineError::TypeComparison {
            left: format!("{} ({})", left, left.type_name()),
            op: op.to_string(),
            right: right.to_string(),
        }),
        (l, r) if l.is_numeric() && r.is_numeric() => Ok(op.accepts(numeric_cmp(l, r))),
        (l, r) => Ok(op.accepts(Some(l.to_string().cmp(&r.to_string())))),
    }
}

fn numeric_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Integer(i), Value::Float(f)) => cmp_int_float(*i, *f),
        (Value::Float(f), Value::Integer(i)) => cmp_int_float(*i, *f).map(Ordering::reverse),
        _ => None,
    }
}

/// Exact integer/float ordering without rounding the integer through f64.
fn cmp_int_float(i: i128, f: f64) -> Option<Ordering> {
    // 2^127, exactly representable
    const LIMIT: f64 = 170_141_183_460_469_231_731_687_303_715_884_105_728.0;

    if f.is_nan() {
        return None;
    }
    if f >= LIMIT {
        return Some(Ordering::Less);
    }
    if f < -LIMIT {
        return Some(Ordering::Greater);
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(f - whole)),
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(v: &str) -> Value {
        Value::String(v.to_string())
    }

    #[test]
    fn test_null_left_operand() {
        assert!(compare(&Value::Null, Operator::Eq, &Value::Null).unwrap());
        assert!(!compare(&Value::Null, Operator::Eq, &Value::Integer(1)).unwrap());
        assert!(compare(&Value::Null, Operator::Ne, &s("x")).unwrap());
        assert!(!compare(&Value::Null, Operator::Ne, &Value::Null).unwrap());
        for op in [Operator::Gt, Operator::Lt, Operator::Gte, Operator::Lte] {
            assert!(!compare(&Value::Null, op, &Value::Integer(0)).unwrap());
        }
    }

    #[test]
    fn test_null_right_operand_is_error() {
        let err = compare(&Value::Integer(1), Operator::Eq, &Value::Null).unwrap_err();
        assert!(matches!(err, EngineError::TypeComparison { .. }));
    }

    #[test]
    fn test_numeric_comparison() {
        assert!(compare(&Value::Integer(30), Operator::Gt, &Value::Integer(25)).unwrap());
        assert!(compare(&Value::Integer(5), Operator::Eq, &Value::Float(5.0)).unwrap());
        assert!(compare(&Value::Float(2.5), Operator::Lt, &Value::Integer(3)).unwrap());
        assert!(compare(&Value::Integer(-3), Operator::Lt, &Value::Float(-2.5)).unwrap());
        assert!(compare(&Value::Integer(10), Operator::Gte, &Value::Integer(10)).unwrap());
        assert!(!compare(&Value::Integer(10), Operator::Lte, &Value::Integer(9)).unwrap());
        // Beyond i64, still exact
        let wide = Value::Integer(99_999_999_999_999_999_999);
        assert!(!compare(&wide, Operator::Eq, &Value::Integer(99_999_999_999_999_999_998)).unwrap());
        assert!(compare(&wide, Operator::Gt, &Value::Integer(99_999_999_999_999_999_998)).unwrap());
    }

    #[test]
    fn test_int_float_precision() {
        // 2^53 + 1 is not representable as f64
        let big = (1_i128 << 53) + 1;
        let as_float = Value::Float((1_i128 << 53) as f64);
        assert!(compare(&Value::Integer(big), Operator::Gt, &as_float).unwrap());
        assert!(compare(&Value::Integer(i128::MAX), Operator::Lt, &Value::Float(1e39)).unwrap());
        assert!(compare(&Value::Integer(i128::MIN), Operator::Eq, &Value::Float(-(2.0_f64.powi(127)))).unwrap());
    }

    #[test]
    fn test_nan_only_unequal() {
        let nan = Value::Float(f64::NAN);
        assert!(compare(&nan, Operator::Ne, &Value::Integer(1)).unwrap());
        assert!(!compare(&nan, Operator::Eq, &nan).unwrap());
        assert!(!compare(&Value::Integer(1), Operator::Gte, &nan).unwrap());
    }

    #[test]
    fn test_textual_fallback() {
        assert!(compare(&s("USA"), Operator::Eq, &s("USA")).unwrap());
        assert!(compare(&s("apple"), Operator::Lt, &s("banana")).unwrap());
        // Mixed types compare as text: "abc" > "5"
        assert!(compare(&s("abc"), Operator::Gt, &Value::Integer(5)).unwrap());
        assert!(compare(&Value::Integer(5), Operator::Eq, &s("5")).unwrap());
        // Text ordering, not numeric: "10" < "9"
        assert!(compare(&s("10"), Operator::Lt, &s("9")).unwrap());
        assert!(compare(&Value::Float(5.0), Operator::Eq, &s("5.0")).unwrap());
    }

    #[test]
    fn test_evaluate_missing_column() {
        let row = Row::new().with("age", 3);
        let pred = Predicate::new("country", Operator::Eq, s("USA"));
        assert!(matches!(pred.evaluate(&row), Err(EngineError::ColumnNotFound(c)) if c == "country"));
    }

    #[test]
    fn test_operator_prefix_matching() {
        assert_eq!(Operator::match_prefix(">= 3"), Some((Operator::Gte, 2)));
        assert_eq!(Operator::match_prefix("> 3"), Some((Operator::Gt, 1)));
        assert_eq!(Operator::match_prefix("!=x"), Some((Operator::Ne, 2)));
        assert_eq!(Operator::match_prefix("=>"), Some((Operator::Eq, 1)));
        assert_eq!(Operator::match_prefix("~"), None);
    }
}
