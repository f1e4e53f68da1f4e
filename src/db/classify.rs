//! Read-only statement gate.
//!
//! A prefix test on the trimmed, lower-cased statement. It does not parse SQL:
//! a data-modifying CTE (`WITH d AS (DELETE ...) SELECT ...`) passes, and so
//! does a second statement after a semicolon. The extended query protocol
//! used by [`super::PgSession`] rejects multi-statement strings on its own.

use tracing::debug;

const READ_ONLY_PREFIXES: &[&str] = &["select", "with", "show", "explain", "describe", "\\d"];

/// True when the statement starts with an allowed read-only keyword.
pub fn is_read_only(sql: &str) -> bool {
    let normalized = sql.trim().to_lowercase();
    let read_only = READ_ONLY_PREFIXES
        .iter()
        .any(|prefix| normalized.starts_with(prefix));

    debug!(read_only, query = %preview(sql, 50), "Query validation");
    read_only
}

/// First `max` characters of `sql`, with an ellipsis when truncated.
pub(crate) fn preview(sql: &str, max: usize) -> String {
    match sql.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    }
}
