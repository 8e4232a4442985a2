//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Broad category of a store failure, for callers that branch on it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputValidation,
    Duplicate,
    NotFound,
    InvalidReference,
    Cascade,
    Persistence,
}

/// Every failure a store operation can report. None of them are fatal.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Empty or missing required field, malformed sub-match or document
    #[error("{0}")]
    InputValidation(String),

    /// Name collision
    #[error("{0}")]
    Duplicate(String),

    /// Referenced id is absent
    #[error("{0}")]
    NotFound(String),

    /// Skill level or team/player id not recognized
    #[error("{0}")]
    InvalidReference(String),

    /// Dependent data blocks the operation
    #[error("{0}")]
    Cascade(String),

    /// Reading or writing the document file failed
    #[error("Could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document could not be encoded or decoded
    #[error("Tournament data is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::InputValidation(_) => ErrorKind::InputValidation,
            StoreError::Duplicate(_) => ErrorKind::Duplicate,
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::InvalidReference(_) => ErrorKind::InvalidReference,
            StoreError::Cascade(_) => ErrorKind::Cascade,
            StoreError::Io { .. } | StoreError::Serialization(_) => ErrorKind::Persistence,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
