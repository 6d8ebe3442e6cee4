//! HTTP error mapping.
//!
//! Every handler returns `Result<_, ApiError>`; this is the only place that
//! decides status codes and error bodies.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domains::records::{FieldErrors, RecordError};

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Error from the record service
    Record(RecordError),
    /// Request body could not be decoded as a record
    MalformedBody(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Record(RecordError::Validation(errors)) => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            ApiError::Record(RecordError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
            ApiError::Record(RecordError::InvalidPageRequest(e)) => {
                let body = FieldErrors::from([(e.field.to_string(), e.message)]);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Record(RecordError::Storage(e)) => {
                error!(error = %format!("{:#}", e), "Storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
            ApiError::MalformedBody(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "body": message }))).into_response()
            }
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        ApiError::Record(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}
