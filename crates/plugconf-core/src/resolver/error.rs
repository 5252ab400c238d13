//! # Plugconf Resolver Errors
//!
//! Error types for the resolution core. Per-plugin and per-bundle failures
//! are contained where they occur and converted into ledger entries or
//! notifications; these types exist for the seams where a failure is still
//! in flight, such as the best-effort auto-invocation path whose `Result`
//! is discarded (and debug-logged) at the call site.

use crate::host::{ModuleExecError, SetupError};

#[derive(Debug, thiserror::Error)]
pub enum ResolverError {
    #[error("module execution failed: {0}")]
    ModuleExec(#[from] ModuleExecError),

    #[error("setup invocation failed: {0}")]
    Setup(#[from] SetupError),

    /// Unrecoverable programming-error signal, distinct from user-facing
    /// findings. Never produced by user input.
    #[error("internal resolver error: {0}")]
    Internal(String),
}

/// Shorthand for Result with the resolver error type
pub type Result<T> = std::result::Result<T, ResolverError>;
