//! Shared test utilities for gateway and command tests.
//!
//! [`RecordingConnector`] stands in for PostgreSQL: it records every opened
//! session, executed statement and bound parameter, and answers queries with
//! canned results.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use postgres::types::ToSql;

use crate::db::{Connector, DbError, QueryResult, ResolvedParameters, Session, Value};
use crate::gateway::Gateway;

#[derive(Debug, Default)]
struct Recorder {
    opened: Vec<ResolvedParameters>,
    executed: Vec<String>,
    bound: Vec<Vec<String>>,
    closed: usize,
    responses: VecDeque<QueryResult>,
    fail_connections: bool,
    query_failure: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingConnector {
    state: Arc<Mutex<Recorder>>,
}

impl RecordingConnector {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, Recorder> {
        self.state.lock().unwrap()
    }

    /// Queue a result for the next query. Queries with nothing queued
    /// return an empty result.
    pub fn respond_with(&self, result: QueryResult) {
        self.state().responses.push_back(result);
    }

    pub fn fail_connections(&self) {
        self.state().fail_connections = true;
    }

    pub fn fail_queries_with(&self, message: &str) {
        self.state().query_failure = Some(message.to_string());
    }

    pub fn opened(&self) -> Vec<ResolvedParameters> {
        self.state().opened.clone()
    }

    pub fn open_count(&self) -> usize {
        self.state().opened.len()
    }

    pub fn closed_count(&self) -> usize {
        self.state().closed
    }

    pub fn executed(&self) -> Vec<String> {
        self.state().executed.clone()
    }

    /// Bound parameters per query, in their `Debug` form.
    pub fn bound_params(&self) -> Vec<Vec<String>> {
        self.state().bound.clone()
    }
}

impl Connector for RecordingConnector {
    type Session = RecordingSession;

    fn open(&self, params: &ResolvedParameters) -> Result<RecordingSession, DbError> {
        let mut state = self.state();
        if state.fail_connections {
            return Err(DbError::Connection {
                host: params.host.clone(),
                port: params.port,
                database: params.database.clone(),
                source: "connection refused".into(),
            });
        }
        state.opened.push(params.clone());
        Ok(RecordingSession {
            state: Arc::clone(&self.state),
        })
    }
}

pub struct RecordingSession {
    state: Arc<Mutex<Recorder>>,
}

impl Session for RecordingSession {
    fn query(
        &mut self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> Result<QueryResult, DbError> {
        let mut state = self.state.lock().unwrap();
        state.executed.push(sql.to_string());
        state
            .bound
            .push(params.iter().map(|p| format!("{:?}", p)).collect());

        if let Some(message) = &state.query_failure {
            return Err(DbError::query(sql, message.as_str()));
        }
        Ok(state.responses.pop_front().unwrap_or_default())
    }
}

impl Drop for RecordingSession {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            state.closed += 1;
        }
    }
}

/// Build a [`QueryResult`] from header names and positional rows.
pub fn query_result(headers: &[&str], rows: Vec<Vec<Value>>) -> QueryResult {
    QueryResult {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows,
    }
}

/// Gateway over a fresh [`RecordingConnector`] with default parameters.
pub fn recording_gateway() -> Gateway<RecordingConnector> {
    Gateway::with_connector(RecordingConnector::new(), ResolvedParameters::default())
}
