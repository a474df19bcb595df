// src/error/types.rs
use thiserror::Error;

/// A malformed or referentially-inconsistent source document.
///
/// Fatal to the load attempt as a whole: the decoder never returns a
/// partially-populated state. `path` names the offending location in the
/// document, e.g. `servers[nas].seasons[s9].show`.
#[derive(Debug, Clone, Error)]
#[error("{path}: {message}")]
pub struct DecodeError {
    pub path: String,
    pub message: String,
}

impl DecodeError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// A snapshot accessor or mutation asked for an id that does not exist.
    /// Unreachable after a successful decode; indicates a bug in snapshot
    /// construction, so callers are expected to propagate it loudly.
    #[error("unknown {kind} '{id}' in server '{server}'")]
    Reference {
        server: String,
        kind: &'static str,
        id: String,
    },

    /// A write/delete/read against durable storage failed. The in-memory
    /// state stays authoritative; the next mutation retries persistence.
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("store selection error: {0}")]
    StoreSelection(String),

    /// A mutation was attempted before any state was loaded.
    #[error("no media state loaded")]
    NotLoaded,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
