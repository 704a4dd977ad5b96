use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TissError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, TissError>;
