use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use serde::Serialize;
use tracing::{info, warn};

use super::BatchCmd;
use crate::commands::Execute;
use crate::db::Connector;
use crate::gateway::{Gateway, GatewayRequest, GatewayResponse};

/// Outcome of one request line
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchLine {
    Ok { ok: GatewayResponse },
    Error { error: String },
}

/// Result of the batch command execution, one entry per request line
#[derive(Debug, Default, Serialize)]
#[serde(transparent)]
pub struct BatchResult {
    pub results: Vec<BatchLine>,
}

/// Run every non-blank line of `reader` against `gateway`, in order.
///
/// Malformed lines and failed operations become error entries; only a
/// failure to read the input aborts the batch.
pub fn run_batch<C: Connector, R: BufRead>(
    gateway: &Gateway<C>,
    reader: R,
) -> Result<BatchResult, Box<dyn Error>> {
    let mut results = Vec::new();

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let outcome = match serde_json::from_str::<GatewayRequest>(&line) {
            Ok(request) => match gateway.dispatch(request) {
                Ok(response) => BatchLine::Ok { ok: response },
                Err(e) => BatchLine::Error {
                    error: e.to_string(),
                },
            },
            Err(e) => BatchLine::Error {
                error: format!("Invalid request on line {}: {}", number + 1, e),
            },
        };

        if let BatchLine::Error { error } = &outcome {
            warn!(line = number + 1, error = %error, "Batch request failed");
        }
        results.push(outcome);
    }

    info!(requests = results.len(), "Batch complete");
    Ok(BatchResult { results })
}

impl Execute for BatchCmd {
    type Output = BatchResult;

    fn execute<C: Connector>(self, gateway: &Gateway<C>) -> Result<Self::Output, Box<dyn Error>> {
        match self.input {
            Some(path) => {
                let file = File::open(&path)
                    .map_err(|e| format!("Failed to open {}: {}", path.display(), e))?;
                run_batch(gateway, BufReader::new(file))
            }
            None => run_batch(gateway, io::stdin().lock()),
        }
    }
}
