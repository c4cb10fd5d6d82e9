//! Query execution engine.
//!
//! Pipeline: load source → filter → aggregate or project. Each query loads
//! its table fresh and runs to completion before returning.

use super::{parse, AggregateArg, AggregateSpec, Predicate, Projection, Query, Selection};
use crate::storage::TableSource;
use crate::telemetry::{query_span, record_query_metrics, stage_span, QueryStage};
use crate::types::{EngineError, Result, Row, Table, Value};
use serde::Serialize;
use tracing::debug;

/// Tabular query output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Output column names, in output order
    pub columns: Vec<String>,
    /// Output rows, in source order
    pub rows: Vec<Row>,
}

/// Query executor bound to a table source.
#[derive(Debug, Clone)]
pub struct Executor<S> {
    source: S,
}

impl<S: TableSource> Executor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Execute a parsed query.
    ///
    /// # Errors
    ///
    /// - `EngineError::TableNotFound` if the source cannot be loaded
    /// - `EngineError::ColumnNotFound` for unknown filter, aggregate or projection columns
    /// - `EngineError::UnsupportedAggregate` for aggregates other than COUNT
    /// - `EngineError::TypeComparison` if the filter cannot compare its operands
    pub fn execute(&self, query: &Query) -> Result<QueryResult> {
        let span = query_span(&query.to_string(), &query.source);
        let _guard = span.enter();

        let table = self.source.load(&query.source)?;
        let scanned = table.len();
        let result = execute_on(query, table)?;

        record_query_metrics(scanned, result.rows.len());
        Ok(result)
    }

    /// Parse and execute query text.
    pub fn execute_sql(&self, sql: &str) -> Result<QueryResult> {
        let query = parse(sql)?;
        self.execute(&query)
    }
}

/// Run filter and aggregate-or-project over an already loaded table.
pub fn execute_on(query: &Query, table: Table) -> Result<QueryResult> {
    let (schema, rows) = table.into_parts();

    let rows = match &query.filter {
        Some(predicate) => {
            let _span = stage_span(QueryStage::Filter, &query.source).entered();
            filter_rows(&schema, rows, predicate)?
        }
        None => rows,
    };

    match &query.selection {
        Selection::Aggregate(spec) => {
            let _span = stage_span(QueryStage::Aggregate, &query.source).entered();
            aggregate(&schema, &rows, spec)
        }
        Selection::Projection(projection) => {
            let _span = stage_span(QueryStage::Project, &query.source).entered();
            project(schema, rows, projection)
        }
    }
}

/// Keep rows matching `predicate`, in original order.
pub fn filter_rows(schema: &[String], rows: Vec<Row>, predicate: &Predicate) -> Result<Vec<Row>> {
    require_column(schema, &predicate.column)?;

    let before = rows.len();
    let mut kept = Vec::with_capacity(before);
    for row in rows {
        if predicate.evaluate(&row)? {
            kept.push(row);
        }
    }
    debug!(predicate = %predicate, before, after = kept.len(), "Filtered rows");
    Ok(kept)
}

fn aggregate(schema: &[String], rows: &[Row], spec: &AggregateSpec) -> Result<QueryResult> {
    if !spec.function.eq_ignore_ascii_case("COUNT") {
        return Err(EngineError::UnsupportedAggregate(spec.function.clone()));
    }

    let count = match &spec.argument {
        AggregateArg::All => rows.len(),
        AggregateArg::Column(column) => {
            require_column(schema, column)?;
            rows.iter()
                .filter(|row| match row.get(column) {
                    None | Some(Value::Null) => false,
                    Some(Value::String(s)) => !s.is_empty(),
                    Some(_) => true,
                })
                .count()
        }
    };

    Ok(QueryResult {
        columns: vec!["count".to_string()],
        rows: vec![Row::new().with("count", Value::Integer(count as i128))],
    })
}

fn project(schema: Vec<String>, rows: Vec<Row>, projection: &Projection) -> Result<QueryResult> {
    let columns = match projection {
        Projection::All => return Ok(QueryResult { columns: schema, rows }),
        Projection::Columns(columns) => columns,
    };

    for column in columns {
        require_column(&schema, column)?;
    }

    let rows = rows
        .iter()
        .map(|row| {
            let mut out = Row::new();
            for column in columns {
                out.insert(column.as_str(), row.get(column).cloned().unwrap_or(Value::Null));
            }
            out
        })
        .collect();

    Ok(QueryResult {
        columns: columns.clone(),
        rows,
    })
}

fn require_column(schema: &[String], column: &str) -> Result<()> {
    if schema.iter().any(|c| c == column) {
        Ok(())
    } else {
        Err(EngineError::column_not_found(column))
    }
}
