#![cfg(test)]

use serde_json::json;

use crate::config::{PluginConfig, PluginDeclaration, ResolverConfig};
use crate::host::SourceLoad;
use crate::host::memory::{EmptyRequire, MemoryCache, ScriptedExports, StaticRequire, StaticSource};
use crate::resolver::engine::{ResolutionEngine, ResolutionOutcome};
use crate::resolver::ledger::ErrorLedger;
use crate::resolver::probe::ModuleProbe;

fn config(auto_setup: bool) -> ResolverConfig {
    ResolverConfig {
        auto_setup,
        ..ResolverConfig::default()
    }
}

#[test]
fn test_first_match_wins() {
    // Both the full name and the stripped variant are loadable; the first
    // wins and the second is flagged as a duplicate without being loaded.
    let source = StaticSource::new()
        .with_module("plugins.nvim-treesitter", SourceLoad::Empty)
        .with_module("plugins.treesitter", SourceLoad::Empty);
    let mut cache = MemoryCache::new();
    let require = EmptyRequire;
    let cfg = config(false);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let outcome = engine.resolve(&PluginDeclaration::new("nvim-treesitter"), &mut ledger);

    assert_eq!(outcome, ResolutionOutcome::Resolved("nvim-treesitter".into()));
    assert_eq!(ledger.duplicates().len(), 1);
    assert_eq!(ledger.duplicates()[0].candidate, "treesitter");
    assert_eq!(source.load_count("plugins.treesitter"), 0);
}

#[test]
fn test_all_remaining_candidates_checked_for_duplicates() {
    let source = StaticSource::new()
        .with_module("plugins.nvim-treesitter", SourceLoad::Empty)
        .with_module("plugins.treesitter", SourceLoad::Empty)
        .with_module("plugins.nvim-treesitter-nvim", SourceLoad::Empty);
    let mut cache = MemoryCache::new();
    let require = EmptyRequire;
    let cfg = config(false);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    engine.resolve(&PluginDeclaration::new("nvim-treesitter"), &mut ledger);

    let flagged: Vec<_> = ledger
        .duplicates()
        .iter()
        .map(|d| d.candidate.as_str())
        .collect();
    assert_eq!(flagged, vec!["treesitter", "nvim-treesitter-nvim"]);
}

#[test]
fn test_later_candidate_wins_when_earlier_missing() {
    let source = StaticSource::new().with_module("plugins.treesitter", SourceLoad::Empty);
    let mut cache = MemoryCache::new();
    let require = EmptyRequire;
    let cfg = config(false);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let outcome = engine.resolve(&PluginDeclaration::new("nvim-treesitter"), &mut ledger);

    assert_eq!(outcome, ResolutionOutcome::Resolved("treesitter".into()));
    assert!(!ledger.errors_found());
}

#[test]
fn test_unresolved_when_no_candidate_loads() {
    let source = StaticSource::new();
    let mut cache = MemoryCache::new();
    let require = EmptyRequire;
    let cfg = config(false);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let outcome = engine.resolve(&PluginDeclaration::new("alpha"), &mut ledger);

    assert_eq!(outcome, ResolutionOutcome::Unresolved);
    assert!(!ledger.errors_found());
}

#[test]
fn test_load_failure_claims_the_plugin() {
    // A raising candidate is recorded and stops further loads; later
    // candidates are still inspected for duplicates.
    let source = StaticSource::new()
        .with_failing("plugins.nvim-treesitter", "syntax error")
        .with_module("plugins.treesitter", SourceLoad::Empty);
    let mut cache = MemoryCache::new();
    let require = EmptyRequire;
    let cfg = config(false);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let outcome = engine.resolve(&PluginDeclaration::new("nvim-treesitter"), &mut ledger);

    assert_eq!(outcome, ResolutionOutcome::Resolved("nvim-treesitter".into()));
    assert_eq!(ledger.failures().len(), 1);
    assert_eq!(ledger.failures()[0].candidate, "nvim-treesitter");
    assert_eq!(ledger.duplicates().len(), 1);
    assert_eq!(source.load_count("plugins.treesitter"), 0);
}

#[test]
fn test_auto_invocation_with_global_flag() {
    let source = StaticSource::new();
    let mut cache = MemoryCache::new();
    let mut require = StaticRequire::new();
    let exports = require.insert("telescope", ScriptedExports::new("telescope"));
    let cfg = config(true);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let outcome = engine.resolve(&PluginDeclaration::new("telescope"), &mut ledger);

    assert_eq!(outcome, ResolutionOutcome::Unresolved);
    assert_eq!(exports.calls(), vec![None]);
}

#[test]
fn test_auto_invocation_attempts_every_candidate() {
    let source = StaticSource::new();
    let mut cache = MemoryCache::new();
    let mut require = StaticRequire::new();
    let plain = require.insert("telescope", ScriptedExports::new("telescope"));
    let suffixed = require.insert("telescope-nvim", ScriptedExports::new("telescope-nvim"));
    let cfg = config(true);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    engine.resolve(&PluginDeclaration::new("telescope"), &mut ledger);

    assert_eq!(plain.calls().len(), 1);
    assert_eq!(suffixed.calls().len(), 1);
}

#[test]
fn test_auto_invocation_passes_config_table() {
    let source = StaticSource::new();
    let mut cache = MemoryCache::new();
    let mut require = StaticRequire::new();
    let exports = require.insert("telescope", ScriptedExports::new("telescope"));
    let cfg = config(false);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let args = json!({"defaults": {"layout": "vertical"}});
    let plugin =
        PluginDeclaration::with_config("telescope", PluginConfig::Args(args.clone()));
    engine.resolve(&plugin, &mut ledger);

    assert_eq!(exports.calls(), vec![Some(args)]);
}

#[test]
fn test_config_true_forces_invocation_without_global_flag() {
    let source = StaticSource::new();
    let mut cache = MemoryCache::new();
    let mut require = StaticRequire::new();
    let exports = require.insert("telescope", ScriptedExports::new("telescope"));
    let cfg = config(false);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let plugin = PluginDeclaration::with_config("telescope", PluginConfig::Flag(true));
    engine.resolve(&plugin, &mut ledger);

    assert_eq!(exports.calls(), vec![None]);
}

#[test]
fn test_config_false_suppresses_invocation() {
    let source = StaticSource::new();
    let mut cache = MemoryCache::new();
    let mut require = StaticRequire::new();
    let exports = require.insert("telescope", ScriptedExports::new("telescope"));
    let cfg = config(true);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let plugin = PluginDeclaration::with_config("telescope", PluginConfig::Flag(false));
    engine.resolve(&plugin, &mut ledger);

    assert!(exports.calls().is_empty());
}

#[test]
fn test_no_invocation_without_flag_or_config() {
    let source = StaticSource::new();
    let mut cache = MemoryCache::new();
    let mut require = StaticRequire::new();
    let exports = require.insert("telescope", ScriptedExports::new("telescope"));
    let cfg = config(false);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    engine.resolve(&PluginDeclaration::new("telescope"), &mut ledger);

    assert!(exports.calls().is_empty());
}

#[test]
fn test_no_invocation_when_a_candidate_resolved() {
    let source = StaticSource::new().with_module("plugins.telescope", SourceLoad::Empty);
    let mut cache = MemoryCache::new();
    let mut require = StaticRequire::new();
    let exports = require.insert("telescope", ScriptedExports::new("telescope"));
    let cfg = config(true);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let outcome = engine.resolve(&PluginDeclaration::new("telescope"), &mut ledger);

    assert_eq!(outcome, ResolutionOutcome::Resolved("telescope".into()));
    assert!(exports.calls().is_empty());
}

#[test]
fn test_setup_failure_is_swallowed() {
    let source = StaticSource::new();
    let mut cache = MemoryCache::new();
    let mut require = StaticRequire::new();
    let exports = require.insert("telescope", ScriptedExports::new("telescope").failing());
    let cfg = config(true);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    let outcome = engine.resolve(&PluginDeclaration::new("telescope"), &mut ledger);

    // Best-effort: the failure leaves no ledger entry
    assert_eq!(outcome, ResolutionOutcome::Unresolved);
    assert!(!ledger.errors_found());
    assert_eq!(exports.calls().len(), 1);
}

#[test]
fn test_module_without_setup_entry_is_skipped() {
    let source = StaticSource::new();
    let mut cache = MemoryCache::new();
    let mut require = StaticRequire::new();
    let exports = require.insert("telescope", ScriptedExports::new("telescope").without_setup());
    let cfg = config(true);
    let mut engine = ResolutionEngine::new(ModuleProbe::new(&source, &mut cache), &require, &cfg);
    let mut ledger = ErrorLedger::new();

    engine.resolve(&PluginDeclaration::new("telescope"), &mut ledger);

    assert!(exports.calls().is_empty());
}
