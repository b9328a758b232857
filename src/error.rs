use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid content document: {0}")]
    ContentParse(#[from] serde_yaml::Error),
    #[error("content check failed: {0}")]
    ContentCheck(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome of a failed submit run. The form controller never surfaces this to
/// the user on its own; it only returns to idle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission cancelled")]
    Cancelled,
    #[error("submission failed: {0}")]
    Failed(String),
}

pub type Result<T, E = FolioError> = std::result::Result<T, E>;
