//! Command definitions and implementations.
//!
//! Each command is defined in its own module with:
//! - The command struct with clap attributes for CLI parsing
//! - An `Execute` impl that runs it against a [`Gateway`]
//! - An `Outputable` impl for its result

mod batch;
mod query;
mod schemas;
mod select;
mod tables;

pub use batch::{run_batch, BatchCmd, BatchLine, BatchResult};
pub use query::QueryCmd;
pub use schemas::SchemasCmd;
pub use select::SelectCmd;
pub use tables::TablesCmd;

use clap::Subcommand;
use std::error::Error;

use crate::db::Connector;
use crate::gateway::Gateway;
use crate::output::{OutputFormat, Outputable};

/// Trait for executing commands with command-specific result types.
pub trait Execute {
    type Output: Outputable;

    fn execute<C: Connector>(self, gateway: &Gateway<C>) -> Result<Self::Output, Box<dyn Error>>;
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the schemas in the database
    Schemas(SchemasCmd),

    /// List the tables and views in a schema
    Tables(TablesCmd),

    /// Run a read-only SQL statement
    Query(QueryCmd),

    /// Select rows from a table
    Select(SelectCmd),

    /// Run newline-delimited JSON requests
    Batch(BatchCmd),

    /// Catch-all for unknown commands
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

impl Command {
    /// Execute the command and return formatted output
    pub fn run<C: Connector>(
        self,
        gateway: &Gateway<C>,
        format: OutputFormat,
    ) -> Result<String, Box<dyn Error>> {
        match self {
            Command::Schemas(cmd) => {
                let result = cmd.execute(gateway)?;
                Ok(result.format(format))
            }
            Command::Tables(cmd) => {
                let result = cmd.execute(gateway)?;
                Ok(result.format(format))
            }
            Command::Query(cmd) => {
                let result = cmd.execute(gateway)?;
                Ok(result.format(format))
            }
            Command::Select(cmd) => {
                let result = cmd.execute(gateway)?;
                Ok(result.format(format))
            }
            Command::Batch(cmd) => {
                let result = cmd.execute(gateway)?;
                Ok(result.format(format))
            }
            Command::Unknown(args) => {
                Err(format!("Unknown command: {}", args.first().unwrap_or(&String::new())).into())
            }
        }
    }
}
