//! # Plugconf Host Interfaces
//!
//! Traits for every external collaborator the resolver talks to: the module
//! namespace and its process-wide cache, the standard require path used for
//! auto-invocation, and the editor-facing sinks (options, notifications,
//! theme). The core never implements module loading itself; it only drives
//! these interfaces.

use std::sync::Arc;

use serde_json::Value;

pub mod memory;

/// Severity attached to host notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// The value a module contributes to the module cache once loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleValue {
    /// Exports returned by the module's loader.
    Exports(Value),
    /// The module ran but returned nothing; it is recorded as loaded anyway.
    Marker,
    /// Failure sentinel an embedder may have left behind for an aborted
    /// load. Still counts as "already loaded" on a cache hit.
    Failed,
}

/// Outcome of asking a [`ModuleSource`] to execute a loader.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceLoad {
    /// The loader ran and returned exports.
    Exports(Value),
    /// The loader ran and returned nothing.
    Empty,
    /// No registered loader could produce this module.
    Missing,
}

/// Error raised by a loader while executing module code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("module '{module}' failed to load: {message}")]
pub struct ModuleExecError {
    pub module: String,
    pub message: String,
}

impl ModuleExecError {
    pub fn new(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            message: message.into(),
        }
    }
}

/// Error raised by a conventional `setup` entry point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("setup for '{module}' failed: {message}")]
pub struct SetupError {
    pub module: String,
    pub message: String,
}

/// Error raised by the theme applier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to apply theme '{name}': {message}")]
pub struct ThemeError {
    pub name: String,
    pub message: String,
}

/// The module namespace the resolver probes. Keys are dotted
/// `prefix.basename` strings; lookups are exact-match and case-sensitive.
pub trait ModuleSource {
    /// True iff some registered resolver can produce a loader for `name`.
    /// Must not execute the loader or mutate any cache.
    fn can_load(&self, name: &str) -> bool;

    /// Find and execute the loader for `name`. Returns
    /// [`SourceLoad::Missing`] when no loader exists; a failure raised while
    /// the loader runs propagates untouched.
    fn load(&self, name: &str) -> Result<SourceLoad, ModuleExecError>;
}

/// Process-wide module cache. Injectable so tests can run isolated
/// resolutions without cross-contamination.
pub trait ModuleCache {
    fn get(&self, name: &str) -> Option<ModuleValue>;
    fn set(&mut self, name: &str, value: ModuleValue);
    fn has_key(&self, name: &str) -> bool;
}

/// Exported surface of a module resolved through the standard require path.
pub trait ModuleExports {
    /// Whether the module exposes a callable `setup` entry point.
    fn has_setup(&self) -> bool;

    /// Invoke the conventional `setup` entry point.
    fn setup(&self, args: Option<&Value>) -> Result<(), SetupError>;
}

/// Standard require path used for auto-invocation. Resolves bare module
/// basenames, independent of the namespace-prefixed lookups used for
/// explicit configuration.
pub trait RequirePath {
    fn require(&self, basename: &str) -> Option<Arc<dyn ModuleExports>>;
}

/// Sink for editor options applied as direct key/value assignments.
pub trait OptionSink {
    fn set_option(&mut self, key: &str, value: &Value);
}

/// Notification sink.
pub trait Notifier {
    fn notify(&mut self, message: &str, severity: Severity);
}

/// Applies a named color theme. Callers decide whether a failure surfaces.
pub trait ThemeApplier {
    fn apply(&mut self, name: &str) -> Result<(), ThemeError>;
}
