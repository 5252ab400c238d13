//! # Plugconf Core
//!
//! Resolves, for a declared set of plugins in a user configuration, which
//! configuration module (if any) applies to each plugin, applies it exactly
//! once, reports ambiguous (duplicate) candidates, and falls back to the
//! conventional `setup` entry point when no explicit configuration exists.
//!
//! The crate is split along the run's moving parts:
//!
//! - [`resolver`]: candidate heuristics, the module probe, the resolution
//!   engine, the bundle pre-pass, and the error ledger.
//! - [`orchestrator`]: the top-level driver for one setup run.
//! - [`config`]: defaults, deep merge, and typed views over the raw user
//!   configuration table.
//! - [`host`]: the collaborator traits the resolver is generic over (module
//!   namespace, module cache, require path, option/notification/theme sinks).

pub mod config;
pub mod host;
pub mod orchestrator;
pub mod resolver;

// Re-export key public types for embedders and the binary
pub use config::{PluginConfig, PluginDeclaration, ResolverConfig};
pub use orchestrator::{HostHandles, RunReport, SetupOrchestrator};
pub use resolver::engine::ResolutionOutcome;
pub use resolver::heuristics::candidates;
pub use resolver::ledger::ErrorLedger;
