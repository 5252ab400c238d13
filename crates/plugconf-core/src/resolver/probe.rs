//! Module probe: cached, idempotent access to the external module namespace.

use crate::host::{ModuleCache, ModuleExecError, ModuleSource, ModuleValue, SourceLoad};

/// Outcome of probing the namespace for a module.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The module is loaded, possibly straight from the cache.
    Found(ModuleValue),
    /// No registered loader could produce the module.
    NotFound,
}

/// Probe over the external module namespace.
///
/// The cache is injected rather than owned so embedders keep their
/// process-wide cache across runs while tests stay isolated.
pub struct ModuleProbe<'a> {
    source: &'a dyn ModuleSource,
    cache: &'a mut dyn ModuleCache,
}

impl<'a> ModuleProbe<'a> {
    pub fn new(source: &'a dyn ModuleSource, cache: &'a mut dyn ModuleCache) -> Self {
        Self { source, cache }
    }

    /// True iff a loader exists for `name`. Never executes the loader and
    /// never touches the cache.
    pub fn can_load(&self, name: &str) -> bool {
        self.source.can_load(name)
    }

    /// Idempotent load of `name`.
    ///
    /// A cache hit short-circuits without re-executing the loader; this
    /// includes a [`ModuleValue::Failed`] sentinel left behind by an earlier
    /// aborted load. On a miss the loader runs once: a module that returns
    /// nothing is cached as [`ModuleValue::Marker`] and still counts as
    /// loaded. Errors raised by the loader are not caught here.
    pub fn load(&mut self, name: &str) -> Result<LoadOutcome, ModuleExecError> {
        if let Some(cached) = self.cache.get(name) {
            return Ok(LoadOutcome::Found(cached));
        }
        match self.source.load(name)? {
            SourceLoad::Exports(exports) => {
                let value = ModuleValue::Exports(exports);
                self.cache.set(name, value.clone());
                Ok(LoadOutcome::Found(value))
            }
            SourceLoad::Empty => {
                self.cache.set(name, ModuleValue::Marker);
                Ok(LoadOutcome::Found(ModuleValue::Marker))
            }
            SourceLoad::Missing => Ok(LoadOutcome::NotFound),
        }
    }
}
