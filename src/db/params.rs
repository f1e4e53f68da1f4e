//! Connection parameter model.
//!
//! [`ConnectionParameters`] is what a caller supplies: every field may be
//! absent. [`ResolvedParameters`] is what a connection is opened with: every
//! field is present. The only way from one to the other is
//! [`ConnectionParameters::overlay`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_DATABASE: &str = "postgres";
pub const DEFAULT_USERNAME: &str = "postgres";
pub const DEFAULT_PASSWORD: &str = "postgres";

/// Partial connection parameters as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionParameters {
    /// Database host, default is 127.0.0.1
    pub host: Option<String>,
    /// Database name
    pub database: Option<String>,
    /// Database username
    pub username: Option<String>,
    /// Database password
    #[serde(skip_serializing)]
    pub password: Option<String>,
    /// Database port, default is 5432
    pub port: Option<u16>,
}

/// Fully resolved connection parameters.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedParameters {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl ConnectionParameters {
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.host.is_none()
            && self.database.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.port.is_none()
    }

    /// Fill every absent field from `base`.
    pub fn overlay(self, base: &ResolvedParameters) -> ResolvedParameters {
        ResolvedParameters {
            host: self.host.unwrap_or_else(|| base.host.clone()),
            port: self.port.unwrap_or(base.port),
            database: self.database.unwrap_or_else(|| base.database.clone()),
            username: self.username.unwrap_or_else(|| base.username.clone()),
            password: self.password.unwrap_or_else(|| base.password.clone()),
        }
    }
}

impl ResolvedParameters {
    /// `postgresql://host:port/database`, used for diagnostics.
    pub fn connection_url(&self) -> String {
        format!("postgresql://{}:{}/{}", self.host, self.port, self.database)
    }
}

impl Default for ResolvedParameters {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            database: DEFAULT_DATABASE.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
        }
    }
}

// Password is redacted so resolved parameters can be logged freely.
impl fmt::Debug for ResolvedParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedParameters")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
