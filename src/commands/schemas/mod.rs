mod cli_tests;
mod execute;
mod output;
mod output_tests;

use clap::Args;

/// List the schemas in the database
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_gateway schemas                      # Schemas of the default database
  pg_gateway --database sales schemas     # Schemas of another database
  pg_gateway -o json schemas              # Output as JSON")]
pub struct SchemasCmd {}
