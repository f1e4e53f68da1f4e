use std::error::Error;

use serde::Serialize;

use super::QueryCmd;
use crate::commands::Execute;
use crate::db::{ConnectionParameters, Connector, ResultSet};
use crate::gateway::Gateway;

/// Rows returned by a query, shared by the query and select commands
#[derive(Debug, Default, Serialize)]
pub struct RowsResult {
    pub query: String,
    pub row_count: usize,
    pub rows: ResultSet,
}

impl RowsResult {
    pub fn new(query: String, rows: ResultSet) -> Self {
        Self {
            query,
            row_count: rows.len(),
            rows,
        }
    }
}

impl Execute for QueryCmd {
    type Output = RowsResult;

    fn execute<C: Connector>(self, gateway: &Gateway<C>) -> Result<Self::Output, Box<dyn Error>> {
        let rows = gateway.execute_query(ConnectionParameters::default(), &self.sql)?;
        Ok(RowsResult::new(self.sql, rows))
    }
}
