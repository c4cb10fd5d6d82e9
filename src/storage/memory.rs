//! In-memory table source.

use super::TableSource;
use crate::types::{EngineError, Result, Table};
use std::collections::HashMap;

/// Tables held in memory, keyed by identifier.
///
/// Each load hands out a clone, so queries never share a table instance.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    tables: HashMap<String, Table>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a table.
    pub fn insert(&mut self, identifier: impl Into<String>, table: Table) {
        self.tables.insert(identifier.into(), table);
    }

    pub fn with_table(mut self, identifier: impl Into<String>, table: Table) -> Self {
        self.insert(identifier, table);
        self
    }
}

impl TableSource for MemorySource {
    fn load(&self, identifier: &str) -> Result<Table> {
        self.tables
            .get(identifier)
            .cloned()
            .ok_or_else(|| EngineError::TableNotFound(identifier.to_string()))
    }
}
