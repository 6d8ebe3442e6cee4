use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use std::time::Duration;

use crate::server::app::AxumAppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    database: DatabaseHealth,
}

#[derive(Serialize)]
pub struct DatabaseHealth {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

const PING_TIMEOUT: Duration = Duration::from_secs(5);

/// `GET /health`: 200 when the record store answers a ping within
/// `PING_TIMEOUT`, 503 otherwise.
pub async fn health_handler(
    Extension(state): Extension<AxumAppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let ping = tokio::time::timeout(PING_TIMEOUT, state.server_deps.records.ping()).await;

    let (code, error) = match ping {
        Ok(Ok(())) => (StatusCode::OK, None),
        Ok(Err(e)) => (StatusCode::SERVICE_UNAVAILABLE, Some(format!("Query failed: {}", e))),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Some(format!("No answer within {}s", PING_TIMEOUT.as_secs())),
        ),
    };

    let body = HealthResponse {
        status: if error.is_none() { "healthy" } else { "unhealthy" },
        database: DatabaseHealth {
            status: if error.is_none() { "ok" } else { "error" },
            error,
        },
    };
    (code, Json(body))
}
