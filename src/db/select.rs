//! Structured `SELECT` requests and the statement builder.
//!
//! The table name is quoted as an identifier. The schema, conditions and
//! order-by text are inserted verbatim: callers that pass untrusted text in
//! those fields get exactly that text in the statement.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::escape::quote_identifier;
use super::ValidationError;

pub const DEFAULT_SCHEMA: &str = "public";

/// A validated request for `SELECT * FROM schema."table" ...`.
///
/// Construction goes through [`SelectRequest::new`] (deserialization included),
/// so a value of this type always has a non-blank table and a positive limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectRequestFields")]
pub struct SelectRequest {
    table: String,
    schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conditions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u64>,
}

/// Unvalidated wire shape of a select request.
#[derive(Debug, Deserialize)]
struct SelectRequestFields {
    table: Option<String>,
    schema: Option<String>,
    conditions: Option<String>,
    #[serde(alias = "orderBy")]
    order_by: Option<String>,
    limit: Option<i64>,
}

impl TryFrom<SelectRequestFields> for SelectRequest {
    type Error = ValidationError;

    fn try_from(fields: SelectRequestFields) -> Result<Self, Self::Error> {
        SelectRequest::new(
            fields.table.unwrap_or_default(),
            fields.schema,
            fields.conditions,
            fields.order_by,
            fields.limit,
        )
    }
}

impl SelectRequest {
    /// Validate and build a request. `schema` defaults to `public`.
    pub fn new(
        table: impl Into<String>,
        schema: Option<String>,
        conditions: Option<String>,
        order_by: Option<String>,
        limit: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let table = table.into();
        if table.trim().is_empty() {
            return Err(ValidationError::BlankTable);
        }

        let limit = match limit {
            Some(n) if n <= 0 => return Err(ValidationError::NonPositiveLimit(n)),
            Some(n) => Some(n as u64),
            None => None,
        };

        Ok(Self {
            table,
            schema: schema.unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            conditions,
            order_by,
            limit,
        })
    }

    /// Request for every row of `schema.table`.
    pub fn table(table: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(table, None, None, None, None)
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn schema(&self) -> &str {
        &self.schema
    }

    pub fn conditions(&self) -> Option<&str> {
        self.conditions.as_deref()
    }

    pub fn order_by(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }
}

/// Present and not just whitespace.
fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Render the request as a single SQL statement.
pub fn build_select(request: &SelectRequest) -> String {
    let mut sql = String::from("SELECT * FROM ");

    if !request.schema.trim().is_empty() {
        sql.push_str(&request.schema);
        sql.push('.');
    }

    sql.push_str(&quote_identifier(&request.table));

    if let Some(conditions) = non_blank(request.conditions()) {
        sql.push_str(" WHERE ");
        sql.push_str(conditions);
    }

    if let Some(order_by) = non_blank(request.order_by()) {
        sql.push_str(" ORDER BY ");
        sql.push_str(order_by);
    }

    if let Some(limit) = request.limit.filter(|n| *n > 0) {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    debug!(query = %sql, "Generated SELECT query");
    sql
}
