//! Output formatting for batch command results.
//!
//! The table format is newline-delimited JSON so batch output can be piped
//! straight into another program.

use super::execute::BatchResult;
use crate::output::Outputable;

impl Outputable for BatchResult {
    fn to_table(&self) -> String {
        self.results
            .iter()
            .map(|line| serde_json::to_string(line).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
