//! Mini SQL - single-table query engine over CSV files
//!
//! Parses a small SQL subset (`SELECT` / `FROM` / `WHERE`, `COUNT`) and runs
//! it against a CSV-backed table:
//! - Typed values cast from raw fields (integer, float, string, null)
//! - One `column op literal` predicate per query
//! - `COUNT(*)` / `COUNT(column)` or a column projection
//!
//! Can be used as:
//! - Rust library (`Executor` over any `TableSource`)
//! - Command-line tool and REPL (`minisql`)

pub mod config;
pub mod query;
pub mod render;
pub mod session;
pub mod storage;
pub mod telemetry;
pub mod types;

// Re-export main types
pub use config::Config;
pub use query::{parse, Executor, Query, QueryResult};
pub use storage::{CsvLoader, MemorySource, TableSource};
pub use types::{EngineError, Result, Row, Table, Value};
