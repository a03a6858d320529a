//! Error types for the persistence and state layers.
//!
//! Only one class matters on the read path: stored data that is absent,
//! unparsable, or structurally invalid. The load path swallows it into a seed
//! fallback; write-path errors surface to the caller.

use thiserror::Error;

/// Errors from the key-value store and the session state container.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to serialize accounts: {0}")]
    Serialize(String),

    #[error("Failed to parse stored accounts: {0}")]
    Parse(String),

    #[error("Stored data has invalid shape: {0}")]
    InvalidShape(String),

    #[error("State lock poisoned")]
    LockPoisoned,
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Io(err.to_string())
    }
}
