//! Tracing instrumentation for the query pipeline.
//!
//! Every execution runs inside a `db.query` span; each stage (load, filter,
//! aggregate, project) opens a nested `db.stage` span.
//!
//! # Example
//!
//! ```rust,ignore
//! use mini_sql::telemetry::{query_span, stage_span, QueryStage};
//!
//! let span = query_span("SELECT COUNT(*) FROM employees", "employees");
//! let _guard = span.enter();
//! let _load = stage_span(QueryStage::Load, "employees").entered();
//! ```

pub mod query;

pub use query::{query_span, record_query_metrics, stage_span, QueryStage};

use tracing_subscriber::EnvFilter;

/// Install a stderr `fmt` subscriber.
///
/// `RUST_LOG` wins over `default_level` when set. Calling this twice is
/// harmless; the second install is ignored.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
