//! Database access layer for the read-only gateway.
//!
//! This module owns everything between a caller's request and PostgreSQL:
//! - Connection parameters and the overlay cache that fills in omitted fields
//! - Opening one physical connection per call
//! - Classifying free-form statements as read-only
//! - Building `SELECT` statements from structured requests
//! - Materializing driver rows into [`Row`]s of [`Value`]s
//!
//! # Type Decisions
//!
//! **Why a closed `Value` enum instead of `serde_json::Value`?**
//! Column types are erased at the materialization boundary. A closed enum keeps
//! temporal and binary values distinct from strings, so consumers match on the
//! variants they care about and serialization decides the text form once.
//!
//! **Why a `Connector`/`Session` seam?**
//! The gateway operations only need "open" and "query". Keeping the driver
//! behind two small traits lets the operations run against a recording
//! connector in tests, which is how "rejected before any connection attempt"
//! is verified.

mod cache;
pub(crate) mod catalog;
pub(crate) mod classify;
mod connection;
mod conversion;
mod escape;
mod materialize;
mod params;
mod select;
mod value;

pub use cache::ParameterCache;
pub use catalog::{TableInfo, LIST_SCHEMAS_SQL, LIST_TABLES_SQL};
pub use classify::is_read_only;
pub use connection::{Connector, PgConnector, PgSession, Session, Timeouts};
pub use escape::quote_identifier;
pub use materialize::{QueryResult, ResultSet, Row};
pub use params::{ConnectionParameters, ResolvedParameters};
pub use select::{build_select, SelectRequest, DEFAULT_SCHEMA};
pub use value::Value;

use thiserror::Error;

/// Boxed error carried as the cause of connection and query failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Request rejected before any database access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Table name cannot be null or empty")]
    BlankTable,

    #[error("Limit must be a positive integer, got {0}")]
    NonPositiveLimit(i64),

    #[error("Only read-only statements (SELECT, WITH, SHOW, EXPLAIN, DESCRIBE) are allowed")]
    NotReadOnly,
}

/// Database error types
#[derive(Error, Debug)]
pub enum DbError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to connect to {host}:{port}/{database}: {source}")]
    Connection {
        host: String,
        port: u16,
        database: String,
        #[source]
        source: BoxError,
    },

    #[error("Failed to execute query: {source} (query: {sql})")]
    QueryExecution {
        sql: String,
        #[source]
        source: BoxError,
    },
}

/// A `postgres` client error carrying the server's own message.
///
/// The client error's `Display` is only its kind ("db error"); the text that
/// says what went wrong lives in its source.
#[derive(Error, Debug)]
#[error("{detail}")]
pub struct DriverError {
    detail: String,
    #[source]
    source: postgres::Error,
}

impl DriverError {
    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<postgres::Error> for DriverError {
    fn from(source: postgres::Error) -> Self {
        let detail = match source.as_db_error() {
            Some(db) => {
                let mut detail = format!(
                    "{}: {} (SQLSTATE {})",
                    db.severity(),
                    db.message(),
                    db.code().code()
                );
                if let Some(extra) = db.detail() {
                    detail.push_str("; DETAIL: ");
                    detail.push_str(extra);
                }
                if let Some(hint) = db.hint() {
                    detail.push_str("; HINT: ");
                    detail.push_str(hint);
                }
                detail
            }
            None => error_chain(&source),
        };
        Self { detail, source }
    }
}

/// `err` followed by each cause in its source chain, skipping causes whose
/// text is already present.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(next) = cause {
        let text = next.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        cause = next.source();
    }
    out
}

impl DbError {
    /// Wrap a driver failure for the given statement.
    pub fn query(sql: &str, source: impl Into<BoxError>) -> Self {
        DbError::QueryExecution {
            sql: sql.to_string(),
            source: source.into(),
        }
    }

    /// Wrap a failure reported by the `postgres` client for the given statement.
    pub fn driver(sql: &str, source: postgres::Error) -> Self {
        Self::query(sql, DriverError::from(source))
    }

    /// True when the request never reached the database.
    pub fn is_validation(&self) -> bool {
        matches!(self, DbError::Validation(_))
    }
}
