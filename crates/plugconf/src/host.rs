//! Host implementations for the command line: a filesystem-backed module
//! source and console-printing sinks. The CLI is a dry-run surface, so the
//! source never executes module code; presence in the tree is what counts.

use std::path::PathBuf;

use plugconf_core::host::{
    ModuleExecError, ModuleSource, Notifier, OptionSink, Severity, SourceLoad, ThemeApplier,
    ThemeError,
};
use serde_json::Value;

/// Module source over a directory tree.
///
/// Module `a.b.c` maps to `<root>/a/b/c.<ext>`, falling back to
/// `<root>/a/b/c/init.<ext>`. Lookups are exact-match and case-sensitive,
/// like the namespace they stand in for.
pub struct DirSource {
    root: PathBuf,
    ext: String,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>, ext: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ext: ext.into(),
        }
    }

    fn path_for(&self, name: &str) -> Option<PathBuf> {
        let rel: PathBuf = name.split('.').collect();
        let file = self.root.join(&rel).with_extension(&self.ext);
        if file.is_file() {
            return Some(file);
        }
        let init = self.root.join(&rel).join(format!("init.{}", self.ext));
        init.is_file().then_some(init)
    }
}

impl ModuleSource for DirSource {
    fn can_load(&self, name: &str) -> bool {
        self.path_for(name).is_some()
    }

    fn load(&self, name: &str) -> Result<SourceLoad, ModuleExecError> {
        Ok(if self.path_for(name).is_some() {
            SourceLoad::Empty
        } else {
            SourceLoad::Missing
        })
    }
}

/// Notifier that prints to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Warn => eprintln!("warning: {message}"),
            Severity::Error => eprintln!("error: {message}"),
            Severity::Info => eprintln!("info: {message}"),
        }
    }
}

/// Option sink that echoes the assignments a real editor would apply.
#[derive(Debug, Default)]
pub struct ConsoleOptions;

impl OptionSink for ConsoleOptions {
    fn set_option(&mut self, key: &str, value: &Value) {
        println!("option {key} = {value}");
    }
}

/// Theme applier that echoes the theme a real editor would apply.
#[derive(Debug, Default)]
pub struct ConsoleTheme;

impl ThemeApplier for ConsoleTheme {
    fn apply(&mut self, name: &str) -> Result<(), ThemeError> {
        println!("colorscheme {name}");
        Ok(())
    }
}
