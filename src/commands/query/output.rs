//! Output formatting for query results.

use super::execute::RowsResult;
use crate::output::{render_rows, row_count, Outputable};

impl Outputable for RowsResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Query: {}", self.query));
        lines.push(String::new());

        if self.rows.is_empty() {
            lines.push("No rows returned.".to_string());
            return lines.join("\n");
        }

        lines.extend(render_rows(&self.rows));
        lines.push(String::new());
        lines.push(format!("({})", row_count(self.row_count)));

        lines.join("\n")
    }
}
