//! Bundle pre-pass: shared configuration modules for named plugin groups.

use std::collections::{HashMap, HashSet};

use crate::host::{Notifier, Severity};
use crate::resolver::probe::{LoadOutcome, ModuleProbe};

/// Plugin names excluded from individual resolution this run. Built
/// entirely by the pre-pass, read-only afterwards.
pub type ExclusionSet = HashSet<String>;

/// Load each declared bundle's shared module.
///
/// A bundle that loads excludes every member from individual resolution. A
/// bundle without a loadable module is warned about and its members fall
/// through to individual resolution. Bundle iteration order is unspecified.
pub fn prepass(
    bundles: &HashMap<String, Vec<String>>,
    probe: &mut ModuleProbe<'_>,
    plugins_dir: &str,
    notifier: &mut dyn Notifier,
) -> ExclusionSet {
    let mut excluded = ExclusionSet::new();
    for (bundle, members) in bundles {
        let module = format!("{plugins_dir}.{bundle}");
        match probe.load(&module) {
            Ok(LoadOutcome::Found(_)) => {
                log::debug!("bundle '{}' configured by '{}'", bundle, module);
                excluded.extend(members.iter().cloned());
            }
            Ok(LoadOutcome::NotFound) => {
                notifier.notify(
                    &format!("No configuration module found for bundle '{bundle}'"),
                    Severity::Warn,
                );
            }
            Err(error) => {
                // Contained: a raising bundle module neither aborts the run
                // nor excludes its members.
                log::debug!("bundle '{}' module raised: {}", bundle, error);
                notifier.notify(
                    &format!("Failed to load configuration module for bundle '{bundle}'"),
                    Severity::Warn,
                );
            }
        }
    }
    excluded
}
