//! Query execution instrumentation.
//!
//! Span attributes follow the OpenTelemetry database conventions
//! (`db.system.name`, `db.operation.name`, `db.collection.name`, `db.query.text`).

use tracing::{field, span, Level, Span};

/// Pipeline stages (maps to `db.operation.name` on stage spans).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    /// Read the source table
    Load,
    /// Apply the WHERE predicate
    Filter,
    /// Reduce filtered rows with an aggregate
    Aggregate,
    /// Shape output columns
    Project,
}

impl QueryStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Filter => "filter",
            Self::Aggregate => "aggregate",
            Self::Project => "project",
        }
    }
}

/// Create the span wrapping one query execution.
///
/// # Example
///
/// ```rust,ignore
/// let span = query_span("SELECT * FROM employees", "employees");
/// let _guard = span.enter();
/// ```
pub fn query_span(query_text: &str, collection: &str) -> Span {
    span!(
        Level::INFO,
        "db.query",
        otel.name = %format!("query {}", collection),
        db.system.name = "csv",
        db.operation.name = "query",
        db.collection.name = collection,
        db.query.text = query_text,
        db.response.scanned_rows = field::Empty,
        db.response.returned_rows = field::Empty,
    )
}

/// Create a span for a single pipeline stage.
pub fn stage_span(stage: QueryStage, collection: &str) -> Span {
    span!(
        Level::DEBUG,
        "db.stage",
        otel.name = %format!("{} {}", stage.as_str(), collection),
        db.operation.name = stage.as_str(),
        db.collection.name = collection,
    )
}

/// Record row counters on the current query span.
pub fn record_query_metrics(rows_scanned: usize, rows_returned: usize) {
    let span = Span::current();
    span.record("db.response.scanned_rows", rows_scanned);
    span.record("db.response.returned_rows", rows_returned);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(QueryStage::Load.as_str(), "load");
        assert_eq!(QueryStage::Filter.as_str(), "filter");
        assert_eq!(QueryStage::Aggregate.as_str(), "aggregate");
        assert_eq!(QueryStage::Project.as_str(), "project");
    }

    #[test]
    fn test_record_without_subscriber_is_noop() {
        let span = query_span("SELECT * FROM t", "t");
        let _guard = span.enter();
        record_query_metrics(3, 1);
    }
}
