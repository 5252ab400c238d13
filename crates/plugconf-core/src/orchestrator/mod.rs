//! # Plugconf Setup Orchestrator
//!
//! Top-level driver for one setup run. A run walks the fixed phase sequence
//! `Idle -> Normalizing -> BundlePrepass -> Resolving -> Theming ->
//! Reporting -> Idle`, strictly sequential and synchronous: the bundle
//! pre-pass fully completes before any per-plugin resolution begins, and
//! candidates are probed left-to-right. The orchestrator owns the error
//! ledger and exposes it read-only after the run.

use serde::Serialize;
use serde_json::Value;

use crate::config::RunInput;
use crate::host::{
    ModuleCache, ModuleSource, Notifier, OptionSink, RequirePath, Severity, ThemeApplier,
};
use crate::resolver::bundle;
use crate::resolver::engine::{ResolutionEngine, ResolutionOutcome};
use crate::resolver::ledger::ErrorLedger;
use crate::resolver::probe::ModuleProbe;


/// The host collaborators handed to the orchestrator for one run.
pub struct HostHandles<'a> {
    pub source: &'a dyn ModuleSource,
    pub cache: &'a mut dyn ModuleCache,
    pub require: &'a dyn RequirePath,
    pub options: &'a mut dyn OptionSink,
    pub notifier: &'a mut dyn Notifier,
    pub theme: &'a mut dyn ThemeApplier,
}

/// Phases of a setup run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Normalizing,
    BundlePrepass,
    Resolving,
    Theming,
    Reporting,
}

/// What a completed run did, for embedders that want to report it.
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    /// Per-plugin outcomes, in resolution order.
    pub outcomes: Vec<(String, ResolutionOutcome)>,
    /// Plugins excluded by a successfully loaded bundle, sorted.
    pub excluded: Vec<String>,
    /// False when the run was the intentional no-op on malformed input.
    pub completed: bool,
}

/// Drives one full setup run and owns the error ledger.
#[derive(Debug, Default)]
pub struct SetupOrchestrator {
    ledger: ErrorLedger,
    phase: Phase,
}

impl SetupOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the findings from the last run.
    pub fn ledger(&self) -> &ErrorLedger {
        &self.ledger
    }

    pub fn errors_found(&self) -> bool {
        self.ledger.errors_found()
    }

    /// Current phase; `Idle` outside of [`SetupOrchestrator::run`].
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Execute one run against `raw` user configuration.
    ///
    /// A root that is absent or not a table resets the ledger and returns
    /// without touching any collaborator: a deliberate no-op, not an error.
    /// Everything else is contained per plugin or per bundle; a run never
    /// aborts midway.
    pub fn run(&mut self, raw: Option<&Value>, host: &mut HostHandles<'_>) -> RunReport {
        self.phase = Phase::Normalizing;
        self.ledger.reset();
        let Some(input) = RunInput::normalize(raw) else {
            self.phase = Phase::Idle;
            return RunReport::default();
        };
        for (key, value) in &input.config.options {
            host.options.set_option(key, value);
        }

        self.phase = Phase::BundlePrepass;
        let mut probe = ModuleProbe::new(host.source, &mut *host.cache);
        let excluded = bundle::prepass(
            &input.bundles,
            &mut probe,
            &input.config.plugins_dir,
            &mut *host.notifier,
        );

        self.phase = Phase::Resolving;
        let mut engine = ResolutionEngine::new(probe, host.require, &input.config);
        let mut outcomes = Vec::new();
        for plugin in &input.plugins {
            if excluded.contains(&plugin.name) {
                continue;
            }
            let outcome = engine.resolve(plugin, &mut self.ledger);
            outcomes.push((plugin.name.clone(), outcome));
        }

        self.phase = Phase::Theming;
        if let Some(theme) = &input.config.colorscheme {
            // Best-effort: a missing theme is not a finding
            if let Err(error) = host.theme.apply(theme) {
                log::debug!("theme '{}' not applied: {}", theme, error);
            }
        }

        self.phase = Phase::Reporting;
        if self.ledger.errors_found() {
            host.notifier.notify(
                "Problems were found while resolving plugin configurations; \
                 run the diagnostics command for details",
                Severity::Warn,
            );
        }

        self.phase = Phase::Idle;
        let mut excluded: Vec<String> = excluded.into_iter().collect();
        excluded.sort();
        RunReport {
            outcomes,
            excluded,
            completed: true,
        }
    }
}
