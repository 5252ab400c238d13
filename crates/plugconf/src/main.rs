mod host;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;
use plugconf_core::config;
use plugconf_core::host::memory::{EmptyRequire, MemoryCache};
use plugconf_core::orchestrator::{HostHandles, SetupOrchestrator};
use plugconf_core::resolver::engine::ResolutionOutcome;

use crate::host::{ConsoleNotifier, ConsoleOptions, ConsoleTheme, DirSource};

/// Plugconf: resolve editor plugin configuration modules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve every declared plugin against a module tree and report findings
    Check {
        /// Path to the user configuration file (json, toml or yaml)
        #[arg(long)]
        config: PathBuf,
        /// Root directory of the configuration module tree
        #[arg(long)]
        modules_dir: PathBuf,
        /// File extension of configuration modules in the tree
        #[arg(long, default_value = "lua")]
        ext: String,
        /// Emit the report and diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the candidate configuration-module names for a plugin name
    Candidates {
        /// The declared plugin name
        name: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();
    match args.command {
        Commands::Check {
            config,
            modules_dir,
            ext,
            json,
        } => run_check(&config, &modules_dir, &ext, json),
        Commands::Candidates { name } => {
            for candidate in plugconf_core::candidates(&name) {
                println!("{candidate}");
            }
            ExitCode::SUCCESS
        }
    }
}

fn run_check(config_path: &Path, modules_dir: &Path, ext: &str, json: bool) -> ExitCode {
    let raw = match config::load_config_file(config_path) {
        Ok(raw) => raw,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };
    debug!("loaded configuration from {}", config_path.display());

    let source = DirSource::new(modules_dir, ext);
    let mut cache = MemoryCache::new();
    let require = EmptyRequire;
    let mut options = ConsoleOptions;
    let mut notifier = ConsoleNotifier;
    let mut theme = ConsoleTheme;
    let mut handles = HostHandles {
        source: &source,
        cache: &mut cache,
        require: &require,
        options: &mut options,
        notifier: &mut notifier,
        theme: &mut theme,
    };

    let mut orchestrator = SetupOrchestrator::new();
    let report = orchestrator.run(Some(&raw), &mut handles);
    if !report.completed {
        eprintln!("error: configuration root must be a table");
        return ExitCode::FAILURE;
    }

    if json {
        let doc = serde_json::json!({
            "outcomes": report.outcomes,
            "excluded": report.excluded,
            "duplicate_configs_found": orchestrator.ledger().duplicates(),
            "failed_to_load": orchestrator.ledger().failures(),
        });
        match serde_json::to_string_pretty(&doc) {
            Ok(rendered) => println!("{rendered}"),
            Err(error) => {
                eprintln!("error: failed to render report: {error}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for (name, outcome) in &report.outcomes {
            match outcome {
                ResolutionOutcome::Resolved(candidate) => {
                    println!("{name}: configured by '{candidate}'");
                }
                ResolutionOutcome::Unresolved => {
                    println!("{name}: no configuration module");
                }
            }
        }
        for name in &report.excluded {
            println!("{name}: covered by a bundle");
        }
        for finding in orchestrator.ledger().duplicates() {
            println!(
                "duplicate: plugin '{}' is also matched by '{}'",
                finding.plugin_name, finding.candidate
            );
        }
        for failure in orchestrator.ledger().failures() {
            println!(
                "load failure: plugin '{}', candidate '{}': {}",
                failure.plugin_name, failure.candidate, failure.error
            );
        }
    }

    if orchestrator.errors_found() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
