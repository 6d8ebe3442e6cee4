//! HTTP client for integration testing.
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`,
//! so requests go through extractors, handlers and error mapping exactly as
//! they would over a socket.

use axum::body::{to_bytes, Body};
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use records_core::kernel::ServerDeps;
use records_core::server::build_app;
use serde_json::Value;
use tower::ServiceExt;

/// API client for executing requests against the router in tests.
#[derive(Clone)]
pub struct ApiClient {
    router: Router,
}

/// Result of a request.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    /// Raw body text (empty for 204/404).
    pub text: String,
}

impl ApiResponse {
    /// Parses the body as JSON, panicking on invalid JSON.
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|e| panic!("Invalid JSON body {:?}: {}", self.text, e))
    }

    /// Names in a page body, in order.
    pub fn names(&self) -> Vec<String> {
        self.json()["content"]
            .as_array()
            .expect("page body has content array")
            .iter()
            .map(|r| r["name"].as_str().expect("record has name").to_string())
            .collect()
    }
}

impl ApiClient {
    /// Creates a client over the given dependencies (any CORS origin).
    pub fn new(server_deps: ServerDeps) -> Self {
        Self {
            router: build_app(server_deps, &[]),
        }
    }

    pub async fn get(&self, uri: &str) -> ApiResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> ApiResponse {
        self.send(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> ApiResponse {
        self.send(Method::PUT, uri, Some(body.to_string())).await
    }

    pub async fn delete(&self, uri: &str) -> ApiResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Sends a raw body with a JSON content type (for malformed-body tests).
    pub async fn send(&self, method: Method, uri: &str, body: Option<String>) -> ApiResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(text) => {
                builder = builder.header(CONTENT_TYPE, "application/json");
                Body::from(text)
            }
            None => Body::empty(),
        };
        let request = builder.body(body).expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");

        ApiResponse {
            status,
            text: String::from_utf8(bytes.to_vec()).expect("Response body is UTF-8"),
        }
    }
}
