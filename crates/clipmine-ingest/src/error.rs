//! Ingest error types.

use thiserror::Error;

pub type IngestResult<T> = Result<T, IngestError>;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),
}
