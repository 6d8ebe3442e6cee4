//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    create_record, delete_record, get_record, health_handler, list_records, update_record,
};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub server_deps: ServerDeps,
}

/// Record CRUD routes, mounted under each resource prefix.
fn record_routes() -> Router {
    Router::new()
        .route("/", get(list_records).post(create_record))
        .route(
            "/:id",
            get(get_record).put(update_record).delete(delete_record),
        )
}

/// Build the CORS layer. An empty origin list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

/// Build the Axum application router
///
/// `/records` is the primary resource path; `/api/students` serves the same
/// handlers for older clients.
pub fn build_app(server_deps: ServerDeps, allowed_origins: &[String]) -> Router {
    let app_state = AxumAppState { server_deps };

    Router::new()
        .nest("/records", record_routes())
        .nest("/api/students", record_routes())
        // Health check
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
