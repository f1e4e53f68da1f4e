use std::error::Error;

use serde::Serialize;

use super::SchemasCmd;
use crate::commands::Execute;
use crate::db::{ConnectionParameters, Connector};
use crate::gateway::Gateway;

/// Result of the schemas command execution
#[derive(Debug, Default, Serialize)]
pub struct SchemasResult {
    pub schemas: Vec<String>,
}

impl Execute for SchemasCmd {
    type Output = SchemasResult;

    fn execute<C: Connector>(self, gateway: &Gateway<C>) -> Result<Self::Output, Box<dyn Error>> {
        let schemas = gateway.list_schemas(ConnectionParameters::default())?;
        Ok(SchemasResult { schemas })
    }
}
