//! CLI argument definitions.
//!
//! This module contains the top-level CLI structure and the global connection
//! flags. Individual command definitions are in the `commands` module.

use clap::Parser;
use std::path::PathBuf;

use crate::commands::Command;
use crate::db::ConnectionParameters;
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Database host (overrides PGHOST and the config file)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Database port
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Database name
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Database username
    #[arg(short = 'U', long, global = true)]
    pub username: Option<String>,

    /// Database password
    #[arg(long, global = true)]
    pub password: Option<String>,

    /// Path to a configuration file (default: ./.pg_gateway.json if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Connection flags given on the command line.
    pub fn connection(&self) -> ConnectionParameters {
        ConnectionParameters {
            host: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}
