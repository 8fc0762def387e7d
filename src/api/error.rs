//! Error types for the library API.

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to the prompt and result files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A file or directory could not be read, written or created.
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The results file does not hold valid JSON.
    #[error("JSON error in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The results file holds JSON, but not an array.
    #[error("Results file '{}' does not contain a JSON array", .0.display())]
    NotAnArray(PathBuf),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StoreError::Json {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The API key variable is unset or empty.
    #[error("Missing {0} in environment variables or .env file.")]
    MissingApiKey(String),

    /// An explicitly requested config file does not exist.
    #[error("Config file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors from the moderation endpoint.
#[derive(Error, Debug)]
pub enum ModerationError {
    /// The request never produced a response, or the body was not JSON.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Moderation API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// A comprehensive error type for a batch run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Failed to build moderation client: {0}")]
    Client(ModerationError),

    /// A prompt failed to moderate; `id` names the prompt.
    #[error("Moderation of {id} failed: {source}")]
    Moderation {
        id: String,
        #[source]
        source: ModerationError,
    },
}
