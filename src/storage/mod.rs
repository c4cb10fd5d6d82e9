//! Table sources.
//!
//! The executor resolves `FROM` identifiers through a [`TableSource`]. Every
//! call re-reads the underlying data; nothing is cached between queries, so a
//! file edited between two queries is always seen fresh.

pub mod csv_loader;
pub mod memory;

pub use csv_loader::CsvLoader;
pub use memory::MemorySource;

use crate::types::{Result, Table};

/// Resolves a table identifier to a freshly loaded [`Table`].
pub trait TableSource {
    /// Load the table named by `identifier`.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::TableNotFound` if the identifier does not resolve
    /// to an existing table.
    fn load(&self, identifier: &str) -> Result<Table>;
}

impl<T: TableSource + ?Sized> TableSource for &T {
    fn load(&self, identifier: &str) -> Result<Table> {
        (**self).load(identifier)
    }
}
