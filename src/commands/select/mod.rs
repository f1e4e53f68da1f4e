mod execute;

use clap::Args;

/// Select rows from a table
///
/// The table name is quoted; --where and --order-by are inserted verbatim.
#[derive(Args, Debug)]
#[command(after_help = "\
Examples:
  pg_gateway select -t users                              # Every row of public.users
  pg_gateway select -t orders -s sales -l 10              # First 10 rows of sales.orders
  pg_gateway select -t users -w \"age > 21\" --order-by name")]
pub struct SelectCmd {
    /// Table to select from
    #[arg(short, long)]
    pub table: String,

    /// Schema containing the table (default: public)
    #[arg(short, long)]
    pub schema: Option<String>,

    /// Filter expression for the WHERE clause
    #[arg(short = 'w', long = "where")]
    pub conditions: Option<String>,

    /// Ordering expression for the ORDER BY clause
    #[arg(long)]
    pub order_by: Option<String>,

    /// Maximum number of rows to return (must be positive)
    #[arg(short, long, allow_negative_numbers = true)]
    pub limit: Option<i64>,
}
