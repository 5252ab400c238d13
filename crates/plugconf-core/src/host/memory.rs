//! In-memory host implementations.
//!
//! These back the CLI's per-run state and let embedders (and this crate's
//! own tests) drive the resolver without a real editor runtime.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::host::{
    ModuleCache, ModuleExecError, ModuleExports, ModuleSource, ModuleValue, Notifier, OptionSink,
    RequirePath, SetupError, Severity, SourceLoad, ThemeApplier, ThemeError,
};

/// Module cache backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, ModuleValue>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ModuleCache for MemoryCache {
    fn get(&self, name: &str) -> Option<ModuleValue> {
        self.entries.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: ModuleValue) {
        self.entries.insert(name.to_string(), value);
    }

    fn has_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

/// Map-backed module source. A name registered as failing still has a
/// loader (so `can_load` reports true); executing it raises.
#[derive(Debug, Default)]
pub struct StaticSource {
    modules: HashMap<String, SourceLoad>,
    failing: HashMap<String, String>,
    load_count: Mutex<HashMap<String, usize>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module whose loader yields `load`.
    pub fn insert(&mut self, name: impl Into<String>, load: SourceLoad) {
        self.modules.insert(name.into(), load);
    }

    /// Register a module whose loader raises `message` when executed.
    pub fn insert_failing(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.failing.insert(name.into(), message.into());
    }

    pub fn with_module(mut self, name: impl Into<String>, load: SourceLoad) -> Self {
        self.insert(name, load);
        self
    }

    pub fn with_failing(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.insert_failing(name, message);
        self
    }

    /// How many times the loader for `name` has been executed.
    pub fn load_count(&self, name: &str) -> usize {
        self.load_count
            .lock()
            .map(|counts| counts.get(name).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

impl ModuleSource for StaticSource {
    fn can_load(&self, name: &str) -> bool {
        self.modules.contains_key(name) || self.failing.contains_key(name)
    }

    fn load(&self, name: &str) -> Result<SourceLoad, ModuleExecError> {
        if let Ok(mut counts) = self.load_count.lock() {
            *counts.entry(name.to_string()).or_insert(0) += 1;
        }
        if let Some(message) = self.failing.get(name) {
            return Err(ModuleExecError::new(name, message.clone()));
        }
        Ok(self
            .modules
            .get(name)
            .cloned()
            .unwrap_or(SourceLoad::Missing))
    }
}

/// Scripted exports for a module on the require path: records every `setup`
/// invocation and its arguments.
#[derive(Debug, Default)]
pub struct ScriptedExports {
    module: String,
    without_setup: bool,
    failing: bool,
    calls: Mutex<Vec<Option<Value>>>,
}

impl ScriptedExports {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            ..Self::default()
        }
    }

    /// A module that exposes no `setup` entry point at all.
    pub fn without_setup(mut self) -> Self {
        self.without_setup = true;
        self
    }

    /// A module whose `setup` raises when invoked.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Arguments recorded across all `setup` invocations so far.
    pub fn calls(&self) -> Vec<Option<Value>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl ModuleExports for ScriptedExports {
    fn has_setup(&self) -> bool {
        !self.without_setup
    }

    fn setup(&self, args: Option<&Value>) -> Result<(), SetupError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(args.cloned());
        }
        if self.failing {
            return Err(SetupError {
                module: self.module.clone(),
                message: "scripted failure".to_string(),
            });
        }
        Ok(())
    }
}

/// Map-backed require path.
#[derive(Default)]
pub struct StaticRequire {
    modules: HashMap<String, Arc<ScriptedExports>>,
}

impl StaticRequire {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `exports` under `basename`, returning a handle for later
    /// inspection of recorded `setup` calls.
    pub fn insert(
        &mut self,
        basename: impl Into<String>,
        exports: ScriptedExports,
    ) -> Arc<ScriptedExports> {
        let exports = Arc::new(exports);
        self.modules.insert(basename.into(), Arc::clone(&exports));
        exports
    }
}

impl RequirePath for StaticRequire {
    fn require(&self, basename: &str) -> Option<Arc<dyn ModuleExports>> {
        self.modules
            .get(basename)
            .map(|exports| Arc::clone(exports) as Arc<dyn ModuleExports>)
    }
}

/// Require path with no modules on it.
#[derive(Debug, Default)]
pub struct EmptyRequire;

impl RequirePath for EmptyRequire {
    fn require(&self, _basename: &str) -> Option<Arc<dyn ModuleExports>> {
        None
    }
}

/// Notifier that records every message it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<(String, Severity)>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(_, severity)| *severity == Severity::Warn)
            .map(|(message, _)| message.as_str())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        self.messages.push((message.to_string(), severity));
    }
}

/// Option sink that records assignments in application order.
#[derive(Debug, Default)]
pub struct RecordingOptions {
    pub applied: Vec<(String, Value)>,
}

impl RecordingOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OptionSink for RecordingOptions {
    fn set_option(&mut self, key: &str, value: &Value) {
        self.applied.push((key.to_string(), value.clone()));
    }
}

/// Theme applier that records applications and can be scripted to fail.
#[derive(Debug, Default)]
pub struct RecordingTheme {
    pub applied: Vec<String>,
    pub failing: bool,
}

impl RecordingTheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

impl ThemeApplier for RecordingTheme {
    fn apply(&mut self, name: &str) -> Result<(), ThemeError> {
        if self.failing {
            return Err(ThemeError {
                name: name.to_string(),
                message: "theme not installed".to_string(),
            });
        }
        self.applied.push(name.to_string());
        Ok(())
    }
}
