use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("failed to read config from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config from {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("gateway endpoint must not be empty")]
    MissingEndpoint,

    #[error("gateway model must not be empty")]
    MissingModel,

    #[error("invalid bind address '{value}'")]
    InvalidBind { value: String },

    #[error("'{field}' must be greater than zero")]
    ZeroTimeout { field: &'static str },

    #[error("math template must contain the '{{expression}}' placeholder")]
    MissingExpressionPlaceholder,

    #[error("failed to expand path '{value}': {message}")]
    PathExpansion { value: String, message: String },

    #[error("failed to read prompt asset {path:?}: {source}")]
    Prompt {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
