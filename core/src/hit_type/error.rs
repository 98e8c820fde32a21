use std::path::PathBuf;
use thiserror::Error;

/// Errors from the ability cache and its remote lookup
#[derive(Debug, Error)]
pub enum HitTypeError {
    #[error("failed to read ability cache {path}")]
    ReadCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write ability cache {path}")]
    WriteCache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ability cache {path} is not valid JSON")]
    DecodeCache {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize ability cache")]
    EncodeCache(#[source] serde_json::Error),

    #[error("ability lookup request failed")]
    Request(#[from] reqwest::Error),

    #[error("invalid ability id '{id}': expected hex")]
    InvalidAbilityId { id: String },
}
