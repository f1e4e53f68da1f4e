mod execute;
mod output;

use clap::Args;

/// List the tables and views in a schema
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_gateway tables                       # Tables and views in 'public'
  pg_gateway tables --schema audit        # Tables and views in 'audit'
  pg_gateway -o toon tables -s sales      # Compact output")]
pub struct TablesCmd {
    /// Schema to list (default: public)
    #[arg(short, long)]
    pub schema: Option<String>,
}
