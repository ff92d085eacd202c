use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the caller. Corrupt payloads read during a
/// passive load are logged and skipped instead of landing here.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("you can save at most {max} systems; delete one before saving another")]
    Capacity { max: usize },
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("no saved system with id \"{0}\"")]
    NotFound(String),
    #[error("storage I/O failed at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
