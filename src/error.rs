// Error types for configuration loading and event emission

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid reporter options: {0}")]
    Options(#[from] serde_json::Error),
}

/// Errors raised while writing an event to a sink
#[derive(Debug, Error)]
pub enum EmitError {
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write event: {0}")]
    Io(#[from] std::io::Error),
}
