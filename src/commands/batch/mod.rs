mod execute;
mod output;

pub use execute::{run_batch, BatchLine, BatchResult};

use clap::Args;
use std::path::PathBuf;

/// Run newline-delimited JSON requests
///
/// Each input line is one request object tagged by "op": list_schemas,
/// list_tables, execute_query or select. Each output line is either
/// {"ok": <result>} or {"error": "<message>"}.
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  echo '{\"op\":\"list_schemas\"}' | pg_gateway batch
  pg_gateway batch --input requests.ndjson
  pg_gateway batch -i requests.ndjson -o json     # Results as one JSON array

Request lines:
  {\"op\":\"list_tables\",\"schema\":\"sales\"}
  {\"op\":\"execute_query\",\"sql\":\"SELECT 1\",\"connection\":{\"database\":\"shop\"}}
  {\"op\":\"select\",\"request\":{\"table\":\"users\",\"limit\":10}}")]
pub struct BatchCmd {
    /// File of requests, one JSON object per line (default: stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}
