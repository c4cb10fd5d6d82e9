//! Interactive session state.
//!
//! Handles one input line at a time:
//! - `LOAD <path>` loads a table and makes it the default
//! - `exit` / `quit` end the session
//! - anything else is a query; when a default table is loaded and the text
//!   has no ` from `, ` FROM <table>` is inserted before any WHERE clause (or
//!   appended), and a FROM naming the loaded table's base name is redirected
//!   to the loaded path

use crate::query::{parse, Executor, Query, QueryResult};
use crate::storage::TableSource;
use crate::types::{EngineError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Outcome of one input line.
#[derive(Debug)]
pub enum Response {
    /// Blank input
    Empty,
    /// `exit` or `quit`
    Exit,
    /// `LOAD` succeeded
    Loaded { path: String, rows: usize },
    /// Query executed
    Rows(QueryResult),
    /// The line failed; the session keeps going
    Failed(EngineError),
}

/// Default table remembered by `LOAD`.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTable {
    /// Identifier as typed after `LOAD`
    pub path: String,
    /// Base name without extension, used as the implicit FROM table
    pub name: String,
}

/// Line-oriented front-end over an [`Executor`].
pub struct Session<S> {
    executor: Executor<S>,
    extension: String,
    loaded: Option<LoadedTable>,
}

impl<S: TableSource> Session<S> {
    pub fn new(source: S) -> Self {
        Self {
            executor: Executor::new(source),
            extension: "csv".to_string(),
            loaded: None,
        }
    }

    /// Extension stripped when deriving a table name from a loaded path.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn loaded(&self) -> Option<&LoadedTable> {
        self.loaded.as_ref()
    }

    /// Handle one input line.
    pub fn handle(&mut self, line: &str) -> Response {
        let line = line.trim();
        if line.is_empty() {
            return Response::Empty;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            return Response::Exit;
        }
        if let Some(path) = load_argument(line) {
            return match self.load(path) {
                Ok(rows) => Response::Loaded {
                    path: path.to_string(),
                    rows,
                },
                Err(e) => Response::Failed(e),
            };
        }

        match self.prepare(line).and_then(|q| self.executor.execute(&q)) {
            Ok(result) => Response::Rows(result),
            Err(e) => Response::Failed(e),
        }
    }

    /// Load `path` and make it the default table. Returns its row count.
    pub fn load(&mut self, path: &str) -> Result<usize> {
        let table = self.executor.source().load(path)?;
        let name = base_name(path, &self.extension);
        info!(path, table = %name, rows = table.len(), "Loaded default table");

        self.loaded = Some(LoadedTable {
            path: path.to_string(),
            name,
        });
        Ok(table.len())
    }

    /// Turn an input line into a query, applying default-table rewriting.
    pub fn prepare(&self, line: &str) -> Result<Query> {
        let text = line.trim().trim_end_matches(';').trim_end();

        let lowered = text.to_ascii_lowercase();
        let text = match &self.loaded {
            Some(loaded) if !lowered.contains(" from ") => match lowered.find(" where ") {
                Some(at) => format!("{} FROM {}{}", &text[..at], loaded.name, &text[at..]),
                None => format!("{} FROM {}", text, loaded.name),
            },
            _ => text.to_string(),
        };

        let mut query = parse(&text)?;
        if let Some(loaded) = &self.loaded {
            if query.source == loaded.name {
                debug!(from = %query.source, to = %loaded.path, "Redirecting to loaded table");
                query.source = loaded.path.clone();
            }
        }
        Ok(query)
    }
}

/// Argument of a `LOAD <path>` command, if `line` is one.
fn load_argument(line: &str) -> Option<&str> {
    let head = line.get(..5)?;
    if !head.eq_ignore_ascii_case("load ") {
        return None;
    }
    let path = line[5..].trim();
    (!path.is_empty()).then_some(path)
}

/// File name of `path` without a trailing `.extension` (case-insensitive).
fn base_name(path: &str, extension: &str) -> String {
    let file = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    let suffix = format!(".{}", extension);
    match file.len().checked_sub(suffix.len()) {
        Some(cut) if file.get(cut..).is_some_and(|t| t.eq_ignore_ascii_case(&suffix)) => {
            file[..cut].to_string()
        }
        _ => file,
    }
}
