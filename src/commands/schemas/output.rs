//! Output formatting for schemas command results.

use super::execute::SchemasResult;
use crate::output::Outputable;

impl Outputable for SchemasResult {
    fn to_table(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Schemas ({}):", self.schemas.len()));

        if self.schemas.is_empty() {
            lines.push("  No schemas found.".to_string());
        }
        for schema in &self.schemas {
            lines.push(format!("  {}", schema));
        }

        lines.join("\n")
    }
}
