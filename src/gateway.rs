//! The four gateway operations.
//!
//! Each operation validates its input, resolves connection parameters through
//! the [`ParameterCache`], opens one session, runs its statement and drops the
//! session before returning. Validation failures return before the cache is
//! touched or a connection is attempted.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db::{
    build_select, catalog, classify, is_read_only, ConnectionParameters, Connector, DbError,
    ParameterCache, PgConnector, ResolvedParameters, ResultSet, SelectRequest, Session,
    TableInfo, Timeouts, ValidationError, DEFAULT_SCHEMA, LIST_SCHEMAS_SQL, LIST_TABLES_SQL,
};

/// Entry point for read-only database access.
#[derive(Debug)]
pub struct Gateway<C = PgConnector> {
    connector: C,
    cache: ParameterCache,
}

impl Gateway<PgConnector> {
    /// PostgreSQL gateway whose cache starts from `seed`.
    pub fn new(seed: ResolvedParameters, timeouts: Timeouts) -> Self {
        Self::with_connector(PgConnector::new(timeouts), seed)
    }
}

impl<C: Connector> Gateway<C> {
    pub fn with_connector(connector: C, seed: ResolvedParameters) -> Self {
        Self {
            connector,
            cache: ParameterCache::with_seed(seed),
        }
    }

    /// Parameters the next call will fall back to.
    pub fn current_parameters(&self) -> ResolvedParameters {
        self.cache.current()
    }

    pub fn connector(&self) -> &C {
        &self.connector
    }

    fn open(&self, connection: ConnectionParameters) -> Result<C::Session, DbError> {
        let params = self.cache.resolve(connection);
        self.connector.open(&params)
    }

    /// List all schemas in the database.
    pub fn list_schemas(&self, connection: ConnectionParameters) -> Result<Vec<String>, DbError> {
        let mut session = self.open(connection)?;
        let result = session.query(LIST_SCHEMAS_SQL, &[])?;
        let schemas = catalog::schema_names(result);

        info!(count = schemas.len(), "Found schemas");
        Ok(schemas)
    }

    /// List tables and views in `schema` (default `public`).
    pub fn list_tables(
        &self,
        connection: ConnectionParameters,
        schema: Option<&str>,
    ) -> Result<Vec<TableInfo>, DbError> {
        let schema = schema.unwrap_or(DEFAULT_SCHEMA);
        info!(schema, "Listing tables");

        let mut session = self.open(connection)?;
        let result = session.query(LIST_TABLES_SQL, &[&schema])?;
        let tables = catalog::table_infos(result);

        info!(count = tables.len(), schema, "Found tables");
        Ok(tables)
    }

    /// Run a read-only statement and return its rows.
    pub fn execute_query(
        &self,
        connection: ConnectionParameters,
        sql: &str,
    ) -> Result<ResultSet, DbError> {
        info!(query = %classify::preview(sql, 100), "Executing query");

        if !is_read_only(sql) {
            warn!(query = %sql, "Attempted to execute non-read-only query");
            return Err(ValidationError::NotReadOnly.into());
        }

        let mut session = self.open(connection)?;
        let result = session.query(sql, &[])?;
        Ok(result.into_rows())
    }

    /// Select rows from a table with optional conditions, ordering and limit.
    pub fn select(
        &self,
        connection: ConnectionParameters,
        request: &SelectRequest,
    ) -> Result<ResultSet, DbError> {
        info!(
            schema = request.schema(),
            table = request.table_name(),
            conditions = request.conditions().unwrap_or("none"),
            "Executing structured select"
        );
        let sql = build_select(request);
        self.execute_query(connection, &sql)
    }

    /// Run one request envelope.
    pub fn dispatch(&self, request: GatewayRequest) -> Result<GatewayResponse, DbError> {
        match request {
            GatewayRequest::ListSchemas { connection } => {
                self.list_schemas(connection).map(GatewayResponse::Schemas)
            }
            GatewayRequest::ListTables { connection, schema } => self
                .list_tables(connection, schema.as_deref())
                .map(GatewayResponse::Tables),
            GatewayRequest::ExecuteQuery { connection, sql } => {
                self.execute_query(connection, &sql).map(GatewayResponse::Rows)
            }
            GatewayRequest::Select { connection, request } => {
                self.select(connection, &request).map(GatewayResponse::Rows)
            }
        }
    }
}

/// Input contract of one gateway operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GatewayRequest {
    ListSchemas {
        #[serde(default)]
        connection: ConnectionParameters,
    },
    ListTables {
        #[serde(default)]
        connection: ConnectionParameters,
        #[serde(default)]
        schema: Option<String>,
    },
    ExecuteQuery {
        #[serde(default)]
        connection: ConnectionParameters,
        sql: String,
    },
    Select {
        #[serde(default)]
        connection: ConnectionParameters,
        request: SelectRequest,
    },
}

/// Output contract of one gateway operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GatewayResponse {
    Schemas(Vec<String>),
    Tables(Vec<TableInfo>),
    Rows(ResultSet),
}
