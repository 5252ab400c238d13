//! Per-run accumulator for resolver findings.

use serde::Serialize;

use crate::host::ModuleExecError;

/// Evidence that more than one candidate module resolves for a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateFinding {
    pub plugin_name: String,
    /// Basename of the extra candidate that also resolves.
    pub candidate: String,
}

/// A candidate module was found but raised while executing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    pub plugin_name: String,
    /// Basename of the candidate whose loader raised.
    pub candidate: String,
    /// The raised error payload.
    pub error: String,
}

/// Two append-only lists of findings, reset at the start of every run.
///
/// Entries are deliberately not deduplicated: repeated identical findings
/// are all recorded.
#[derive(Debug, Default)]
pub struct ErrorLedger {
    duplicate_configs_found: Vec<DuplicateFinding>,
    failed_to_load: Vec<LoadFailure>,
}

impl ErrorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all findings. Called once at the start of every run.
    pub fn reset(&mut self) {
        self.duplicate_configs_found.clear();
        self.failed_to_load.clear();
    }

    pub fn record_duplicate(&mut self, plugin_name: &str, candidate: &str) {
        self.duplicate_configs_found.push(DuplicateFinding {
            plugin_name: plugin_name.to_string(),
            candidate: candidate.to_string(),
        });
    }

    pub fn record_failure(&mut self, plugin_name: &str, candidate: &str, error: ModuleExecError) {
        self.failed_to_load.push(LoadFailure {
            plugin_name: plugin_name.to_string(),
            candidate: candidate.to_string(),
            error: error.to_string(),
        });
    }

    pub fn duplicates(&self) -> &[DuplicateFinding] {
        &self.duplicate_configs_found
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failed_to_load
    }

    /// True iff at least one of the two lists is non-empty.
    pub fn errors_found(&self) -> bool {
        !self.duplicate_configs_found.is_empty() || !self.failed_to_load.is_empty()
    }
}
