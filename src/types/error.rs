//! Error types for query parsing and execution.
//!
//! Uses `thiserror` for ergonomic error definitions with automatic `From` implementations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Every failure a query can hit, from parsing to rendering.
///
/// All variants are terminal for the query that raised them: the executor
/// never returns a partial result alongside an error.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Query text does not match the grammar
    #[error("Syntax error: {0}")]
    Syntax(String),

    /// Source table file could not be located
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Column referenced by a predicate, aggregate or projection is not in the schema
    #[error("Column not found in table: {0}")]
    ColumnNotFound(String),

    /// Aggregate function other than COUNT
    #[error("Unsupported aggregate: {0}")]
    UnsupportedAggregate(String),

    /// Operands cannot be compared with the given operator
    #[error("Unsupported comparison: {left} {op} {right}")]
    TypeComparison {
        left: String,
        op: String,
        right: String,
    },

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Create a syntax error with context.
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    /// Create a column-not-found error for `column`.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound(column.into())
    }

    /// Stable label for the error kind.
    ///
    /// The interactive session prefixes reported errors with it.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Syntax(_) => "syntax",
            Self::TableNotFound(_) => "table_not_found",
            Self::ColumnNotFound(_) => "column_not_found",
            Self::UnsupportedAggregate(_) => "unsupported_aggregate",
            Self::TypeComparison { .. } => "type_comparison",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Csv(_) => "csv",
            Self::Json(_) => "json",
        }
    }
}
