//! # Plugconf Resolver
//!
//! The decision core of the crate: which configuration module, if any,
//! applies to each declared plugin.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`heuristics`]**: derives the ordered candidate module basenames from
//!   a plugin's declared name.
//! - **[`probe`]**: queries the external module namespace, either checking
//!   that a candidate *can* load or loading it with idempotent, cached
//!   semantics.
//! - **[`engine`]**: walks a plugin's candidates first-match-wins, records
//!   duplicate candidates, and falls back to auto-invocation of the
//!   conventional `setup` entry point.
//! - **[`bundle`]**: the pre-pass that loads shared bundle modules and
//!   excludes their members from individual resolution.
//! - **[`ledger`]**: the per-run accumulator of duplicate-configuration and
//!   load-failure findings.
//! - **[`error`]**: resolver error types.

pub mod bundle;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod ledger;
pub mod probe;

pub use bundle::ExclusionSet;
pub use engine::{ResolutionEngine, ResolutionOutcome};
pub use ledger::{DuplicateFinding, ErrorLedger, LoadFailure};
pub use probe::{LoadOutcome, ModuleProbe};

// Test module declaration
#[cfg(test)]
mod tests;
