//! SQL query parsing and execution.
//!
//! Supports a single-table subset:
//! - `SELECT * FROM table`
//! - `SELECT col1, col2 FROM table WHERE col op literal`
//! - `SELECT COUNT(*) FROM table`, `SELECT COUNT(col) FROM table`
//!
//! # Example
//!
//! ```rust
//! use mini_sql::query::{parse, Executor};
//! use mini_sql::storage::MemorySource;
//! use mini_sql::types::{Row, Table};
//!
//! let table = Table::new(
//!     vec!["name".into(), "age".into()],
//!     vec![Row::new().with("name", "Ann").with("age", 41)],
//! )
//! .unwrap();
//! let source = MemorySource::new().with_table("people", table);
//!
//! let query = parse("SELECT name FROM people WHERE age >= 40").unwrap();
//! let result = Executor::new(source).execute(&query).unwrap();
//! assert_eq!(result.columns, vec!["name"]);
//! assert_eq!(result.rows.len(), 1);
//! ```

pub mod executor;
pub mod parser;
pub mod predicates;

pub use executor::{execute_on, Executor, QueryResult};
pub use parser::parse;
pub use predicates::{compare, Operator, Predicate};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output columns of a non-aggregate query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Projection {
    /// `*`: every schema column in schema order
    All,
    /// Named columns, order and duplicates preserved
    Columns(Vec<String>),
}

/// Argument of an aggregate call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AggregateArg {
    /// `*`: count every row
    All,
    /// Count rows where the column is neither Null nor an empty string
    Column(String),
}

impl fmt::Display for AggregateArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "*"),
            Self::Column(c) => write!(f, "{}", c),
        }
    }
}

/// Aggregate call in the select list.
///
/// The parser only produces `COUNT`; other names are rejected at execution
/// with `EngineError::UnsupportedAggregate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateSpec {
    pub function: String,
    pub argument: AggregateArg,
}

impl AggregateSpec {
    pub fn count(argument: AggregateArg) -> Self {
        Self {
            function: "COUNT".to_string(),
            argument,
        }
    }
}

/// What the query returns: a projection or a single aggregate row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Selection {
    Projection(Projection),
    Aggregate(AggregateSpec),
}

/// Parsed query. Built once per input string and never mutated by execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    pub selection: Selection,
    /// Table identifier from the FROM clause
    pub source: String,
    /// Optional WHERE predicate
    pub filter: Option<Predicate>,
}

impl Query {
    /// `SELECT * FROM source`
    pub fn select_all(source: impl Into<String>) -> Self {
        Self {
            selection: Selection::Projection(Projection::All),
            source: source.into(),
            filter: None,
        }
    }

    /// `SELECT col, ... FROM source`
    pub fn select<I, S>(columns: I, source: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selection: Selection::Projection(Projection::Columns(
                columns.into_iter().map(Into::into).collect(),
            )),
            source: source.into(),
            filter: None,
        }
    }

    /// `SELECT COUNT(arg) FROM source`
    pub fn count(argument: AggregateArg, source: impl Into<String>) -> Self {
        Self {
            selection: Selection::Aggregate(AggregateSpec::count(argument)),
            source: source.into(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(predicate);
        self
    }

    /// Projection, unless an aggregate shapes the output.
    pub fn projection(&self) -> Option<&Projection> {
        match &self.selection {
            Selection::Projection(p) => Some(p),
            Selection::Aggregate(_) => None,
        }
    }

    pub fn aggregate(&self) -> Option<&AggregateSpec> {
        match &self.selection {
            Selection::Aggregate(a) => Some(a),
            Selection::Projection(_) => None,
        }
    }
}

impl fmt::Display for Query {
    /// Canonical SQL text, used in log spans.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        match &self.selection {
            Selection::Projection(Projection::All) => write!(f, "*")?,
            Selection::Projection(Projection::Columns(cols)) => write!(f, "{}", cols.join(", "))?,
            Selection::Aggregate(agg) => write!(f, "{}({})", agg.function, agg.argument)?,
        }
        write!(f, " FROM {}", self.source)?;
        if let Some(pred) = &self.filter {
            write!(f, " WHERE {}", pred)?;
        }
        Ok(())
    }
}
