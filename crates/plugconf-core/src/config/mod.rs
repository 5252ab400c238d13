//! # Plugconf Configuration
//!
//! Intake and normalization of the user-supplied configuration table:
//! built-in defaults, recursive last-write-wins merge of user values over
//! them, and the typed views the resolver consumes. File loading (JSON,
//! and TOML/YAML behind the corresponding features) lives here too so the
//! binary stays thin.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Map, Value, json};

pub mod error;
pub mod format;

pub use error::ConfigError;
pub use format::ConfigFormat;


/// Built-in namespace prefix for per-plugin configuration modules.
pub const DEFAULT_PLUGINS_DIR: &str = "plugins";

/// Immutable resolver settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Namespace prefix for configuration modules, trailing separators
    /// already stripped.
    pub plugins_dir: String,
    /// Global fallback flag: invoke a plugin's conventional `setup` entry
    /// point when no configuration module resolves.
    pub auto_setup: bool,
    /// Editor options applied as direct key/value assignments.
    pub options: Map<String, Value>,
    /// Theme applied after resolution, if any.
    pub colorscheme: Option<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            plugins_dir: DEFAULT_PLUGINS_DIR.to_string(),
            auto_setup: false,
            options: Map::new(),
            colorscheme: None,
        }
    }
}

/// Per-plugin configuration directive from the user table.
#[derive(Debug, Clone, PartialEq)]
pub enum PluginConfig {
    /// Force (`true`) or suppress (`false`) auto-invocation.
    Flag(bool),
    /// Explicit arguments handed to the conventional `setup` entry point.
    Args(Value),
}

/// A plugin as declared in the user configuration. Read-only to the core.
#[derive(Debug, Clone, PartialEq)]
pub struct PluginDeclaration {
    pub name: String,
    pub config: Option<PluginConfig>,
}

impl PluginDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: None,
        }
    }

    pub fn with_config(name: impl Into<String>, config: PluginConfig) -> Self {
        Self {
            name: name.into(),
            config: Some(config),
        }
    }

    /// Truthiness of the declared config: an args table or an explicit
    /// `true` asks for the auto-setup fallback even when the global flag is
    /// off. An absent config defers to the global flag.
    pub fn wants_setup(&self) -> bool {
        matches!(
            self.config,
            Some(PluginConfig::Flag(true)) | Some(PluginConfig::Args(_))
        )
    }
}

/// The fully normalized input for one orchestrator run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunInput {
    pub config: ResolverConfig,
    /// Declarations sorted by name, so run order is deterministic.
    pub plugins: Vec<PluginDeclaration>,
    pub bundles: HashMap<String, Vec<String>>,
}

impl RunInput {
    /// Normalize a raw user table.
    ///
    /// Returns `None` when the root is absent or not a table; that is the
    /// caller's cue for the intentional no-op on malformed input. Otherwise
    /// the user table is deep-merged over the defaults (user values win on
    /// every conflicting key, recursively) and the typed views extracted.
    /// Entries of the wrong shape inside a well-formed root are skipped.
    pub fn normalize(raw: Option<&Value>) -> Option<Self> {
        let raw = raw?;
        if !raw.is_object() {
            return None;
        }
        let mut merged = default_tree();
        merge_value(&mut merged, raw);

        let mut config = ResolverConfig::default();
        if let Some(Value::Object(table)) = merged.get("config") {
            if let Some(dir) = table.get("plugins_dir").and_then(Value::as_str) {
                config.plugins_dir = strip_trailing_separators(dir).to_string();
            }
            if let Some(flag) = table.get("auto_setup").and_then(Value::as_bool) {
                config.auto_setup = flag;
            }
            if let Some(Value::Object(options)) = table.get("options") {
                config.options = options.clone();
            }
            // "colorscheme" takes precedence over the alternate spelling
            config.colorscheme = table
                .get("colorscheme")
                .and_then(Value::as_str)
                .or_else(|| table.get("colourscheme").and_then(Value::as_str))
                .map(str::to_string);
        }

        let mut plugins = Vec::new();
        let mut bundles = HashMap::new();
        if let Some(Value::Object(entries)) = merged.get("plugins") {
            for (name, entry) in entries {
                // "bundles" is a reserved key inside the plugins table
                if name == "bundles" {
                    bundles = parse_bundles(entry);
                    continue;
                }
                plugins.push(parse_plugin(name, entry));
            }
        }
        plugins.sort_by(|a, b| a.name.cmp(&b.name));

        Some(Self {
            config,
            plugins,
            bundles,
        })
    }
}

fn parse_plugin(name: &str, entry: &Value) -> PluginDeclaration {
    let config = entry.get("config").and_then(|config| match config {
        Value::Bool(flag) => Some(PluginConfig::Flag(*flag)),
        Value::Object(_) => Some(PluginConfig::Args(config.clone())),
        _ => None,
    });
    PluginDeclaration {
        name: name.to_string(),
        config,
    }
}

fn parse_bundles(entry: &Value) -> HashMap<String, Vec<String>> {
    let Value::Object(table) = entry else {
        return HashMap::new();
    };
    table
        .iter()
        .filter_map(|(bundle, members)| {
            let members = members.as_array()?;
            let members = members
                .iter()
                .filter_map(|member| member.as_str().map(str::to_string))
                .collect();
            Some((bundle.clone(), members))
        })
        .collect()
}

/// The documented defaults, as a mergeable tree.
fn default_tree() -> Value {
    json!({
        "config": {
            "plugins_dir": DEFAULT_PLUGINS_DIR,
            "auto_setup": false,
            "options": {},
        },
        "plugins": {},
    })
}

/// Deep-merge `user` over `base`. User values win on every conflicting key,
/// recursively for nested tables; anything else is replaced wholesale.
pub fn merge_value(base: &mut Value, user: &Value) {
    match (base, user) {
        (Value::Object(base_table), Value::Object(user_table)) => {
            for (key, user_value) in user_table {
                match base_table.get_mut(key) {
                    Some(base_value) if base_value.is_object() && user_value.is_object() => {
                        merge_value(base_value, user_value);
                    }
                    _ => {
                        base_table.insert(key.clone(), user_value.clone());
                    }
                }
            }
        }
        (base_slot, user_value) => *base_slot = user_value.clone(),
    }
}

fn strip_trailing_separators(prefix: &str) -> &str {
    prefix.trim_end_matches(['/', '\\', '.'])
}

/// Load a configuration file into a raw value, format chosen by extension.
pub fn load_config_file(path: &Path) -> Result<Value, ConfigError> {
    let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnknownFormat {
        path: path.to_path_buf(),
    })?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    format.parse(&content)
}
