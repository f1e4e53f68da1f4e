//! Connection factory.
//!
//! Every gateway call opens its own physical connection and drops it before
//! returning. There is no pool; a [`Session`] lives exactly as long as the
//! call that opened it, and dropping it closes the connection on every exit
//! path.

use std::time::Duration;

use postgres::types::ToSql;
use postgres::{Client, Config, NoTls};
use tracing::{debug, error, info};

use super::materialize::{materialize, QueryResult};
use super::params::ResolvedParameters;
use super::{DbError, DriverError};

const APPLICATION_NAME: &str = "pg_gateway";

/// Bounds on connection establishment and statement execution.
///
/// `None` leaves the corresponding wait unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Option<Duration>,
    pub statement: Option<Duration>,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            connect: Some(Duration::from_secs(10)),
            statement: Some(Duration::from_secs(30)),
        }
    }
}

/// An open connection that can run one statement at a time.
pub trait Session {
    /// Execute `sql` with bound `params` and materialize every row.
    fn query(
        &mut self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<QueryResult, DbError>;
}

/// Opens sessions from resolved parameters.
pub trait Connector: Send + Sync {
    type Session: Session;

    fn open(&self, params: &ResolvedParameters) -> Result<Self::Session, DbError>;
}

/// PostgreSQL connector using the synchronous `postgres` client without TLS.
#[derive(Debug, Clone, Default)]
pub struct PgConnector {
    timeouts: Timeouts,
}

impl PgConnector {
    pub fn new(timeouts: Timeouts) -> Self {
        Self { timeouts }
    }

    pub fn timeouts(&self) -> Timeouts {
        self.timeouts
    }

    /// Driver configuration for `params`.
    pub fn config(&self, params: &ResolvedParameters) -> Config {
        let mut config = Config::new();
        config
            .host(&params.host)
            .port(params.port)
            .dbname(&params.database)
            .user(&params.username)
            .password(&params.password)
            .application_name(APPLICATION_NAME);

        if let Some(timeout) = self.timeouts.connect {
            config.connect_timeout(timeout);
        }
        if let Some(timeout) = self.timeouts.statement {
            config.options(&format!("-c statement_timeout={}", timeout.as_millis()));
        }
        config
    }
}

impl Connector for PgConnector {
    type Session = PgSession;

    fn open(&self, params: &ResolvedParameters) -> Result<PgSession, DbError> {
        let target = params.connection_url();
        debug!(target = %target, "Creating database connection");

        match self.config(params).connect(NoTls) {
            Ok(client) => {
                info!(target = %target, "Successfully connected to PostgreSQL database");
                Ok(PgSession { client, target })
            }
            Err(e) => {
                let cause = DriverError::from(e);
                error!(target = %target, error = %cause, "Failed to connect to PostgreSQL database");
                Err(DbError::Connection {
                    host: params.host.clone(),
                    port: params.port,
                    database: params.database.clone(),
                    source: cause.into(),
                })
            }
        }
    }
}

/// One open PostgreSQL connection.
pub struct PgSession {
    client: Client,
    target: String,
}

impl Session for PgSession {
    fn query(
        &mut self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<QueryResult, DbError> {
        materialize(&mut self.client, sql, params)
    }
}

impl Drop for PgSession {
    fn drop(&mut self) {
        debug!(target = %self.target, "Closing database connection");
    }
}
