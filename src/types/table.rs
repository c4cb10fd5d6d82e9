//! Rows and tables.
//!
//! A [`Table`] is an ordered sequence of [`Row`]s plus the schema (ordered
//! column names) taken from the source header. Tables are built fresh for
//! every query and are read-only once constructed.

use super::error::{EngineError, Result};
use super::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Ordered mapping from column name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    fields: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field, replacing the value in place if the column already exists.
    pub fn insert(&mut self, column: impl Into<String>, value: Value) {
        let column = column.into();
        match self.fields.iter_mut().find(|(name, _)| *name == column) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Builder-style [`Row::insert`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value.into());
        self
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Rows plus their shared schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    schema: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, normalizing every row to the schema.
    ///
    /// Rows are reordered to schema order and columns they omit are filled
    /// with Null, so every row carries exactly the schema's columns.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::ColumnNotFound` naming the first column a row
    /// carries that is not in the schema.
    pub fn new(schema: Vec<String>, rows: Vec<Row>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(rows.len());
        for row in rows {
            if let Some(stray) = row.columns().find(|c| !schema.iter().any(|s| s == c)) {
                return Err(EngineError::column_not_found(stray));
            }
            let mut fixed = Row::new();
            for column in &schema {
                fixed.insert(column.as_str(), row.get(column).cloned().unwrap_or(Value::Null));
            }
            normalized.push(fixed);
        }
        Ok(Self {
            schema,
            rows: normalized,
        })
    }

    pub fn schema(&self) -> &[String] {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.schema.iter().any(|c| c == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Consume the table, yielding schema and rows.
    pub fn into_parts(self) -> (Vec<String>, Vec<Row>) {
        (self.schema, self.rows)
    }
}
