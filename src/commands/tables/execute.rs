use std::error::Error;

use serde::Serialize;

use super::TablesCmd;
use crate::commands::Execute;
use crate::db::{ConnectionParameters, Connector, TableInfo, DEFAULT_SCHEMA};
use crate::gateway::Gateway;

/// Result of the tables command execution
#[derive(Debug, Serialize)]
pub struct TablesResult {
    pub schema: String,
    pub tables: Vec<TableInfo>,
}

impl Execute for TablesCmd {
    type Output = TablesResult;

    fn execute<C: Connector>(self, gateway: &Gateway<C>) -> Result<Self::Output, Box<dyn Error>> {
        let tables =
            gateway.list_tables(ConnectionParameters::default(), self.schema.as_deref())?;
        Ok(TablesResult {
            schema: self.schema.unwrap_or_else(|| DEFAULT_SCHEMA.to_string()),
            tables,
        })
    }
}
