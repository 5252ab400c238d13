//! Resolution engine: first-match-wins candidate probing per plugin.

use serde::Serialize;

use crate::config::{PluginConfig, PluginDeclaration, ResolverConfig};
use crate::host::RequirePath;
use crate::resolver::error::Result;
use crate::resolver::heuristics;
use crate::resolver::ledger::ErrorLedger;
use crate::resolver::probe::{LoadOutcome, ModuleProbe};

/// Result of resolving a single plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ResolutionOutcome {
    /// A configuration module claimed the plugin; carries the basename of
    /// the winning candidate. A candidate whose loader raised still claims
    /// the plugin (the failure is recorded in the ledger).
    Resolved(String),
    /// No candidate resolved. Auto-invocation may have run as a fallback.
    Unresolved,
}

/// Walks each plugin's candidate list against the module namespace.
pub struct ResolutionEngine<'a> {
    probe: ModuleProbe<'a>,
    require: &'a dyn RequirePath,
    plugins_dir: &'a str,
    auto_setup: bool,
}

impl<'a> ResolutionEngine<'a> {
    pub fn new(
        probe: ModuleProbe<'a>,
        require: &'a dyn RequirePath,
        config: &'a ResolverConfig,
    ) -> Self {
        Self {
            probe,
            require,
            plugins_dir: &config.plugins_dir,
            auto_setup: config.auto_setup,
        }
    }

    /// Resolve one plugin declaration, appending any findings to `ledger`.
    ///
    /// Candidates are probed strictly left-to-right. The first candidate
    /// that loads (or raises while loading) wins; every remaining candidate
    /// is then only checked with `can_load`, and each hit is recorded as a
    /// duplicate-configuration finding. If nothing resolved and either the
    /// global `auto_setup` flag or the plugin's own config asks for it, the
    /// conventional `setup` entry point is invoked best-effort.
    pub fn resolve(&mut self, plugin: &PluginDeclaration, ledger: &mut ErrorLedger) -> ResolutionOutcome {
        let candidates = heuristics::candidates(&plugin.name);
        let mut outcome = ResolutionOutcome::Unresolved;
        let mut found_custom = false;

        for candidate in &candidates {
            let module = format!("{}.{}", self.plugins_dir, candidate);
            if found_custom {
                // Later candidates are only inspected, never loaded.
                if self.probe.can_load(&module) {
                    ledger.record_duplicate(&plugin.name, candidate);
                }
                continue;
            }
            match self.probe.load(&module) {
                Ok(LoadOutcome::Found(_)) => {
                    log::debug!("plugin '{}' configured by '{}'", plugin.name, module);
                    outcome = ResolutionOutcome::Resolved(candidate.clone());
                    found_custom = true;
                }
                Ok(LoadOutcome::NotFound) => {}
                Err(error) => {
                    // The candidate exists but raised; it still claims the
                    // plugin, so no further candidate is loaded.
                    ledger.record_failure(&plugin.name, candidate, error);
                    outcome = ResolutionOutcome::Resolved(candidate.clone());
                    found_custom = true;
                }
            }
        }

        if !found_custom && (self.auto_setup || plugin.wants_setup()) {
            self.auto_invoke(plugin, &candidates);
        }
        outcome
    }

    /// Best-effort fallback through the standard require path, attempted
    /// for every candidate. Failures are swallowed by design; they surface
    /// only in the debug log.
    fn auto_invoke(&self, plugin: &PluginDeclaration, candidates: &[String]) {
        for candidate in candidates {
            if let Err(error) = self.invoke_candidate(plugin, candidate) {
                log::debug!(
                    "auto-setup of '{}' via '{}' skipped: {}",
                    plugin.name,
                    candidate,
                    error
                );
            }
        }
    }

    fn invoke_candidate(&self, plugin: &PluginDeclaration, candidate: &str) -> Result<()> {
        let Some(exports) = self.require.require(candidate) else {
            return Ok(());
        };
        if !exports.has_setup() {
            return Ok(());
        }
        match &plugin.config {
            Some(PluginConfig::Args(args)) => exports.setup(Some(args))?,
            Some(PluginConfig::Flag(true)) => exports.setup(None)?,
            Some(PluginConfig::Flag(false)) => {}
            None => {
                if self.auto_setup {
                    exports.setup(None)?;
                }
            }
        }
        Ok(())
    }
}
