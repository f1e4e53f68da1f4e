//! Result materialization.
//!
//! A statement is prepared once, its column names are read from the statement
//! metadata, and every row is converted in cursor order. Any failure along
//! the way discards the rows collected so far.

use std::time::Instant;

use postgres::types::ToSql;
use postgres::Client;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use tracing::{debug, error, info};

use super::conversion::row_values;
use super::{DbError, Value};

/// Result of a query execution: column names plus positional rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// One result row as column-name/value pairs in column order.
///
/// Column names come from the statement metadata and may repeat
/// (`SELECT 1 AS a, 2 AS a`); every pair is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    entries: Vec<(String, Value)>,
}

/// Rows in cursor order.
pub type ResultSet = Vec<Row>;

impl QueryResult {
    /// Pair each positional row with the headers.
    pub fn into_rows(self) -> ResultSet {
        let headers = self.headers;
        self.rows
            .into_iter()
            .map(|values| Row {
                entries: headers.iter().cloned().zip(values).collect(),
            })
            .collect()
    }

    /// Values of the named column, one per row.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &Value>> {
        let idx = self.headers.iter().position(|h| h == name)?;
        Some(self.rows.iter().filter_map(move |row| row.get(idx)))
    }
}

impl Row {
    pub fn new(entries: Vec<(String, Value)>) -> Self {
        Self { entries }
    }

    /// Value for `column`; with duplicate names the last one wins.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, value)| value)
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn logged(err: DbError) -> DbError {
    error!(error = %err, "Query execution failed");
    err
}

/// Prepare, execute and convert `sql` on an open client.
pub fn materialize(
    client: &mut Client,
    sql: &str,
    params: &[&(dyn ToSql + Sync)],
) -> Result<QueryResult, DbError> {
    let start = Instant::now();

    let statement = client.prepare(sql).map_err(|e| logged(DbError::driver(sql, e)))?;
    let headers: Vec<String> = statement
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    let pg_rows = client
        .query(&statement, params)
        .map_err(|e| logged(DbError::driver(sql, e)))?;

    let mut rows = Vec::with_capacity(pg_rows.len());
    for row in &pg_rows {
        rows.push(row_values(row).map_err(|e| logged(DbError::query(sql, e)))?);
    }

    info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        rows = rows.len(),
        "Query executed successfully"
    );
    debug!(columns = ?headers, "Result columns");

    Ok(QueryResult { headers, rows })
}
