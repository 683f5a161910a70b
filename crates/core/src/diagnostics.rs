//! Per-call warning channel for lenient operations.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

/// A recovered problem encountered while serving a request.
///
/// None of these abort the operation that produced them; they explain why
/// the returned value is smaller or more default-heavy than expected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// The platform could not supply a user configuration directory.
    #[error("user config directory unavailable, falling back to {}", fallback.display())]
    ConfigDirUnavailable {
        /// Directory used in its place.
        fallback: PathBuf,
    },
    /// An expected document is absent from the content bundle.
    #[error("bundle is missing {name}")]
    MissingBundleDocument {
        /// Logical filename that was looked up.
        name: String,
    },
    /// A filesystem operation failed.
    #[error("{action} {}: {message}", path.display())]
    Io {
        /// What was being attempted (e.g. "failed to read").
        action: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },
    /// A structured document could not be parsed.
    #[error("failed to parse {}: {message}", path.display())]
    Parse {
        /// Path (or logical name) of the document.
        path: PathBuf,
        /// Parser error message.
        message: String,
    },
    /// A save identifier was rejected before touching the filesystem.
    #[error("invalid save id {id:?}")]
    InvalidSaveId {
        /// The rejected identifier.
        id: String,
    },
}

impl Warning {
    pub(crate) fn io(action: &'static str, path: &Path, err: impl std::fmt::Display) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            message: err.to_string(),
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// A value together with the warnings recorded while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    /// The (possibly degraded) result.
    pub value: T,
    /// Problems recovered from along the way, in the order they occurred.
    pub warnings: Vec<Warning>,
}

impl<T> Outcome<T> {
    /// True when nothing had to be recovered.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Discard the warnings and keep the value.
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Accumulates warnings for a single call, logging each as it arrives.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Adopt warnings recorded (and logged) by a nested call.
    pub(crate) fn extend(&mut self, warnings: impl IntoIterator<Item = Warning>) {
        self.warnings.extend(warnings);
    }

    pub(crate) fn finish<T>(self, value: T) -> Outcome<T> {
        Outcome {
            value,
            warnings: self.warnings,
        }
    }
}
