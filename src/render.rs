//! Result rendering for terminals and scripts.

use crate::query::QueryResult;
use crate::types::{Result, Row, Value};

/// Render rows as an aligned text table.
///
/// Columns are left-aligned and padded to the widest of header and cells.
/// Null renders as an empty cell; an empty result renders `(0 rows)` under
/// the header.
///
/// # Example
///
/// ```rust
/// use mini_sql::render::format_table;
/// use mini_sql::types::Row;
///
/// let rows = vec![Row::new().with("name", "Ann").with("age", 41)];
/// let text = format_table(&["name".into(), "age".into()], &rows);
/// assert_eq!(text, "name | age\n-----+----\nAnn  | 41 ");
/// ```
pub fn format_table(columns: &[String], rows: &[Row]) -> String {
    if columns.is_empty() {
        return "(no columns)".to_string();
    }

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| cell_text(row.get(c))).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|line| line[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let pad = |text: &str, width: usize| format!("{:<width$}", text, width = width);

    let header = columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| pad(c, *w))
        .collect::<Vec<_>>()
        .join(" | ");
    let separator = widths
        .iter()
        .map(|w| "-".repeat(*w))
        .collect::<Vec<_>>()
        .join("-+-");

    let mut lines = vec![header, separator];
    if cells.is_empty() {
        lines.push("(0 rows)".to_string());
    }
    for line in &cells {
        lines.push(
            line.iter()
                .zip(&widths)
                .map(|(cell, w)| pad(cell, *w))
                .collect::<Vec<_>>()
                .join(" | "),
        );
    }
    lines.join("\n")
}

/// Render a result as a pretty-printed JSON array of row objects.
pub fn to_json(result: &QueryResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(&result.rows)?)
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(v) => v.to_string(),
    }
}
