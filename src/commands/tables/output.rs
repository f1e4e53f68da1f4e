//! Output formatting for tables command results.

use super::execute::TablesResult;
use crate::output::Outputable;

impl Outputable for TablesResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Tables in {} ({}):", self.schema, self.tables.len()));

        if self.tables.is_empty() {
            lines.push("  No tables found.".to_string());
        }
        for table in &self.tables {
            match &table.comment {
                Some(comment) => lines.push(format!(
                    "  {} [{}] - {}",
                    table.name, table.table_type, comment
                )),
                None => lines.push(format!("  {} [{}]", table.name, table.table_type)),
            }
        }

        lines.join("\n")
    }
}
