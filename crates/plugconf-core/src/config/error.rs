//! Configuration intake error types.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown or unsupported config format for path: {path}")]
    UnknownFormat { path: PathBuf },

    #[error("failed to parse {format} configuration: {message}")]
    Parse { format: &'static str, message: String },

    #[error("failed to read configuration file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
