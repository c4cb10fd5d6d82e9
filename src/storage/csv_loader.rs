//! Delimited-file table loader.

use super::TableSource;
use crate::config::Config;
use crate::telemetry::{stage_span, QueryStage};
use crate::types::{cast, EngineError, Result, Row, Table};
use std::fs::File;
use std::io::ErrorKind;
use tracing::{debug, warn};

/// Loads tables from CSV files located through [`Config`].
///
/// The first record is the header and becomes the schema. Short records are
/// padded with Null; surplus fields are dropped.
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    config: Config,
}

impl CsvLoader {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl TableSource for CsvLoader {
    fn load(&self, identifier: &str) -> Result<Table> {
        let _span = stage_span(QueryStage::Load, identifier).entered();

        let path = self.config.resolve_path(identifier);
        let file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => EngineError::TableNotFound(path.display().to_string()),
            _ => EngineError::Io(e),
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter_byte()?)
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        let schema: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut rows = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            if record.len() > schema.len() {
                warn!(
                    table = identifier,
                    record = line + 1,
                    extra = record.len() - schema.len(),
                    "Dropping surplus fields"
                );
            }

            let mut row = Row::new();
            for (i, column) in schema.iter().enumerate() {
                row.insert(column.as_str(), cast(record.get(i)));
            }
            rows.push(row);
        }

        debug!(table = identifier, path = %path.display(), rows = rows.len(), "Loaded table");
        Table::new(schema, rows)
    }
}
