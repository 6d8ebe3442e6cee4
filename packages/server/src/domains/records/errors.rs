use thiserror::Error;

use crate::common::{PageParamError, RecordId};
use crate::domains::records::validation::FieldErrors;

/// Errors surfaced by record operations
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Validation failed for: {}", .0.keys().cloned().collect::<Vec<_>>().join(", "))]
    Validation(FieldErrors),

    #[error("Record {0} not found")]
    NotFound(RecordId),

    #[error("Invalid page request: {0}")]
    InvalidPageRequest(#[from] PageParamError),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
