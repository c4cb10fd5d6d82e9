//! Core data types: values, rows, tables and errors.

pub mod error;
pub mod table;
pub mod value;

pub use error::{EngineError, Result};
pub use table::{Row, Table};
pub use value::{cast, Value};
