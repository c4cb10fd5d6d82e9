//! Query parser.
//!
//! Grammar:
//!
//! ```text
//! QUERY       := "SELECT" WS SELECT_PART WS "FROM" WS TABLE [WS "WHERE" WS COND]
//! SELECT_PART := "*" | "COUNT(" ARG ")" | COLUMN ("," COLUMN)*
//! COND        := COLUMN WS? OP WS? LITERAL
//! OP          := "=" | "!=" | ">=" | "<=" | ">" | "<"
//! ```
//!
//! Keywords are case-insensitive; column and table names are kept verbatim.
//! The select part ends at the first `FROM` keyword whose tail parses, so a
//! column list may itself contain the word `from`. No schema checks happen
//! here; unknown columns surface at execution.

use super::{AggregateArg, AggregateSpec, Operator, Predicate, Projection, Query, Selection};
use crate::types::value::strip_quotes;
use crate::types::{EngineError, Result, Value};
use tracing::debug;

const QUERY_FORM: &str = "Invalid SQL. Expected: SELECT <cols> FROM <table> [WHERE <cond>]";
const WHERE_FORM: &str = "Invalid WHERE clause. Expected: column operator value";
const COUNT_FORM: &str = "Invalid COUNT. Expected: COUNT(*) or COUNT(<column>)";

/// Parse a query string.
///
/// # Errors
///
/// Returns `EngineError::Syntax` describing the expected form when the text
/// does not match the grammar.
///
/// # Example
///
/// ```rust
/// use mini_sql::query::{parse, Operator};
/// use mini_sql::types::Value;
///
/// let q = parse("SELECT * FROM customers WHERE country = 'USA'").unwrap();
/// let filter = q.filter.unwrap();
/// assert_eq!(filter.column, "country");
/// assert_eq!(filter.operator, Operator::Eq);
/// assert_eq!(filter.literal, Value::String("USA".into()));
/// ```
pub fn parse(text: &str) -> Result<Query> {
    let body = text.trim_start();
    let rest = strip_keyword(body, "SELECT")
        .filter(|r| starts_with_whitespace(r))
        .ok_or_else(|| EngineError::syntax(QUERY_FORM))?;

    let (select_part, source, condition) =
        split_clauses(rest).ok_or_else(|| EngineError::syntax(QUERY_FORM))?;

    let selection = parse_selection(select_part.trim())?;
    let filter = condition.map(parse_condition).transpose()?;

    let query = Query {
        selection,
        source: source.to_string(),
        filter,
    };
    debug!(query = %query, "Parsed query");
    Ok(query)
}

/// Locate `FROM`, the table token and the optional WHERE condition.
///
/// Tries each whitespace-delimited `FROM` left to right and takes the first
/// whose tail is well-formed.
fn split_clauses(rest: &str) -> Option<(&str, &str, Option<&str>)> {
    for (pos, _) in rest.char_indices() {
        if pos == 0 || !ends_with_whitespace(&rest[..pos]) {
            continue;
        }
        let Some(after) = strip_keyword(&rest[pos..], "FROM") else {
            continue;
        };
        let select_part = &rest[..pos];
        // The select part needs at least one character besides its separator.
        if select_part.chars().count() < 2 {
            continue;
        }
        if let Some((table, condition)) = parse_tail(after) {
            return Some((select_part, table, condition));
        }
    }
    None
}

/// Parse `WS TABLE [WS "WHERE" WS COND] WS*` following the FROM keyword.
fn parse_tail(after_from: &str) -> Option<(&str, Option<&str>)> {
    if !starts_with_whitespace(after_from) {
        return None;
    }
    let tail = after_from.trim_start();
    let table_end = tail.find(char::is_whitespace).unwrap_or(tail.len());
    let table = &tail[..table_end];
    if table.is_empty() {
        return None;
    }

    let remainder = &tail[table_end..];
    if remainder.trim().is_empty() {
        return Some((table, None));
    }

    let condition = strip_keyword(remainder.trim_start(), "WHERE")?;
    if !starts_with_whitespace(condition) {
        return None;
    }
    Some((table, Some(condition)))
}

fn parse_selection(part: &str) -> Result<Selection> {
    if let Some(inner) = strip_keyword(part, "COUNT(") {
        if let Some(arg) = inner.strip_suffix(')') {
            let argument = match arg.trim() {
                "*" => AggregateArg::All,
                column => AggregateArg::Column(column.to_string()),
            };
            return Ok(Selection::Aggregate(AggregateSpec::count(argument)));
        }
        // `COUNT(a), b` is a column list; only an unclosed paren is malformed.
        if part.matches('(').count() > part.matches(')').count() {
            return Err(EngineError::syntax(COUNT_FORM));
        }
    }

    if part == "*" {
        return Ok(Selection::Projection(Projection::All));
    }

    let columns: Vec<String> = part
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect();
    if columns.is_empty() {
        return Err(EngineError::syntax("No columns specified in SELECT"));
    }
    Ok(Selection::Projection(Projection::Columns(columns)))
}

/// Parse `column op literal`.
fn parse_condition(text: &str) -> Result<Predicate> {
    let text = text.trim();
    let column_end = text
        .find(|c: char| !is_word_char(c))
        .unwrap_or(text.len());
    let column = &text[..column_end];
    if column.is_empty() {
        return Err(EngineError::syntax(WHERE_FORM));
    }

    let rest = text[column_end..].trim_start();
    let (operator, op_len) =
        Operator::match_prefix(rest).ok_or_else(|| EngineError::syntax(WHERE_FORM))?;

    let literal = rest[op_len..].trim();
    if literal.is_empty() {
        return Err(EngineError::syntax(WHERE_FORM));
    }

    Ok(Predicate::new(column, operator, parse_literal(literal)))
}

/// Parse a WHERE literal.
///
/// Quoting is checked first, so `'42'` stays a String; otherwise integer,
/// then float, then the raw text.
pub fn parse_literal(token: &str) -> Value {
    let token = token.trim();
    if let Some(inner) = strip_quotes(token) {
        return Value::String(inner.to_string());
    }
    Value::parse_number(token).unwrap_or_else(|| Value::String(token.to_string()))
}

/// Case-insensitive ASCII keyword prefix; returns the text after it.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let head = text.get(..keyword.len())?;
    if head.eq_ignore_ascii_case(keyword) {
        Some(&text[keyword.len()..])
    } else {
        None
    }
}

fn starts_with_whitespace(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_whitespace)
}

fn ends_with_whitespace(text: &str) -> bool {
    text.chars().next_back().is_some_and(char::is_whitespace)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
