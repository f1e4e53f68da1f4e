mod execute;
mod output;

pub use execute::RowsResult;

use clap::Args;

/// Run a read-only SQL statement
///
/// Only statements starting with SELECT, WITH, SHOW, EXPLAIN or DESCRIBE
/// are accepted; anything else is rejected before connecting.
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_gateway query 'SELECT * FROM users LIMIT 5'
  pg_gateway query 'SHOW server_version'
  pg_gateway -o json query 'WITH t AS (SELECT 1 AS n) SELECT n FROM t'")]
pub struct QueryCmd {
    /// SQL statement to execute
    pub sql: String,
}
