//! Configuration file and environment handling.
//!
//! The parameter cache is seeded from four layers, later layers winning per
//! field: built-in defaults, `PG*` environment variables, the
//! `.pg_gateway.json` configuration file, and command-line flags.

use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::db::{ConnectionParameters, ResolvedParameters, Timeouts};

/// Configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = ".pg_gateway.json";

/// Top-level configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Connection parameters; every field is optional
    pub connection: ConnectionParameters,
    /// Connect and statement timeouts
    pub timeouts: TimeoutsConfig,
}

/// Timeouts in whole seconds. Absent means the default, `0` disables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimeoutsConfig {
    pub connect_secs: Option<u64>,
    pub statement_secs: Option<u64>,
}

impl TimeoutsConfig {
    pub fn to_timeouts(self) -> Timeouts {
        let defaults = Timeouts::default();
        Timeouts {
            connect: seconds(self.connect_secs, defaults.connect),
            statement: seconds(self.statement_secs, defaults.statement),
        }
    }
}

fn seconds(value: Option<u64>, default: Option<Duration>) -> Option<Duration> {
    match value {
        None => default,
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
    }
}

impl ConfigFile {
    /// Load `.pg_gateway.json` from the current directory.
    ///
    /// A missing file is not an error and yields `None`.
    pub fn load() -> Result<Option<Self>, Box<dyn Error>> {
        let config_path = PathBuf::from(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Ok(None);
        }
        Self::load_from(&config_path).map(Some)
    }

    /// Load a configuration file from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file doesn't exist or cannot be read
    /// - The JSON is invalid
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

        let config: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| format!("Invalid JSON in {}: {}", path.display(), e))?;

        Ok(config)
    }
}

/// Connection parameters from `PGHOST`, `PGPORT`, `PGDATABASE`, `PGUSER`
/// and `PGPASSWORD`. Unset or empty variables are left absent.
pub fn env_parameters() -> Result<ConnectionParameters, Box<dyn Error>> {
    parameters_from(|name| std::env::var(name).ok())
}

fn parameters_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConnectionParameters, Box<dyn Error>> {
    let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

    let port = match var("PGPORT") {
        Some(raw) => Some(
            raw.trim()
                .parse::<u16>()
                .map_err(|e| format!("Invalid PGPORT '{}': {}", raw, e))?,
        ),
        None => None,
    };

    Ok(ConnectionParameters {
        host: var("PGHOST"),
        database: var("PGDATABASE"),
        username: var("PGUSER"),
        password: var("PGPASSWORD"),
        port,
    })
}

/// Everything the binary needs to build a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub seed: ResolvedParameters,
    pub timeouts: Timeouts,
}

impl GatewayConfig {
    /// Layer defaults, environment, configuration file and `flags`.
    ///
    /// With `config_path` the file must exist; without it
    /// `.pg_gateway.json` is used when present.
    pub fn resolve(
        config_path: Option<&Path>,
        flags: ConnectionParameters,
    ) -> Result<Self, Box<dyn Error>> {
        let file = match config_path {
            Some(path) => ConfigFile::load_from(path)?,
            None => ConfigFile::load()?.unwrap_or_default(),
        };
        Ok(Self::layer(env_parameters()?, file, flags))
    }

    fn layer(env: ConnectionParameters, file: ConfigFile, flags: ConnectionParameters) -> Self {
        let seed = env.overlay(&ResolvedParameters::default());
        let seed = file.connection.overlay(&seed);
        let seed = flags.overlay(&seed);
        Self {
            seed,
            timeouts: file.timeouts.to_timeouts(),
        }
    }
}
