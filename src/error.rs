//! Error types shared by the configuration store, the authenticator and the secret client.

use std::path::PathBuf;
use thiserror::Error;

/// Underlying cause of a configuration store failure.
#[derive(Debug, Error)]
pub enum StoreFailure {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    /// Missing or inconsistent configuration, e.g. an unknown environment name.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configuration file could not be read, parsed or written.
    #[error("config store error at {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: StoreFailure,
    },

    /// Credentials were rejected by the remote service, or a required credential is missing.
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("no secret found at {0}")]
    NotFound(String),

    /// The remote service rejected a write or delete.
    #[error("failed to write {path}: {message}")]
    Write { path: String, message: String },

    #[error("invalid input: {0}")]
    Validation(String),

    /// Any other non-success response from the remote service.
    #[error("request for {path} failed with status {status}: {message}")]
    Api {
        status: u16,
        path: String,
        message: String,
    },

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not resolve service address for environment '{environment}': {message}")]
    Discovery { environment: String, message: String },
}

impl Error {
    pub(crate) fn store(path: impl Into<PathBuf>, source: impl Into<StoreFailure>) -> Self {
        Error::Store {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
