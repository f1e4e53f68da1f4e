//! Last-used connection parameters.
//!
//! Successive calls only need to supply the fields that differ from the
//! previous call. The merge and the write-back happen under one lock, so two
//! concurrent callers never interleave a read of the register with the
//! other's write.

use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::params::{ConnectionParameters, ResolvedParameters};

#[derive(Debug)]
pub struct ParameterCache {
    current: Mutex<ResolvedParameters>,
}

impl ParameterCache {
    /// Cache seeded with the hard-coded defaults.
    pub fn new() -> Self {
        Self::with_seed(ResolvedParameters::default())
    }

    /// Cache seeded with parameters resolved from configuration.
    pub fn with_seed(seed: ResolvedParameters) -> Self {
        Self {
            current: Mutex::new(seed),
        }
    }

    /// Merge `partial` over the current parameters and store the result.
    pub fn resolve(&self, partial: ConnectionParameters) -> ResolvedParameters {
        let mut current = self.lock();
        let resolved = partial.overlay(&current);
        *current = resolved.clone();
        debug!(
            host = %resolved.host,
            port = resolved.port,
            database = %resolved.database,
            username = %resolved.username,
            "Using connection parameters"
        );
        resolved
    }

    /// Current parameters without modifying the cache.
    pub fn current(&self) -> ResolvedParameters {
        self.lock().clone()
    }

    // The register only ever holds a complete value, so a poisoned lock is
    // still safe to read.
    fn lock(&self) -> MutexGuard<'_, ResolvedParameters> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for ParameterCache {
    fn default() -> Self {
        Self::new()
    }
}
