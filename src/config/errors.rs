use std::path::PathBuf;

use thiserror::Error;

/// Errors that may occur while loading or validating client configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory could be resolved.
    #[error("No suitable config directory available")]
    NoConfigDir,
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// The configured backend base URL is not a valid absolute URL.
    #[error("Invalid backend URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// URL as written in the config.
        url: String,
        /// Parse error from the `url` crate.
        source: url::ParseError,
    },
}
