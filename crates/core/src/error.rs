//! Hard failures surfaced by the save repository.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result alias for fallible save operations.
pub type Result<T> = std::result::Result<T, SaveError>;

/// Errors that abort a save operation.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to {action} {}: {source}", path.display())]
    /// A directory or file could not be created or written.
    Io {
        /// What was being attempted.
        action: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize save state: {0}")]
    /// The save state could not be encoded.
    Serialize(#[from] serde_yaml::Error),

    #[error("no free save id for timestamp {timestamp} after {attempts} attempts")]
    /// Every candidate identifier for the current second was taken.
    IdExhausted {
        /// Unix timestamp the identifiers were derived from.
        timestamp: i64,
        /// Number of candidates tried.
        attempts: u32,
    },
}

impl SaveError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
