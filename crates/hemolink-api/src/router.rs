//! Route definitions for the Hemolink HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via
//! Axum's `State` extractor.

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(blood_request_routes())
        .merge(notification_routes())
        .merge(health_routes());

    let ws_routes = Router::new().route("/ws", get(handlers::ws::ws_handler));

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .merge(ws_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Blood request lifecycle endpoints
fn blood_request_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/blood-requests",
            post(handlers::blood_request::create_request),
        )
        .route(
            "/blood-requests",
            get(handlers::blood_request::list_requests),
        )
        .route(
            "/blood-requests/{id}",
            get(handlers::blood_request::get_request),
        )
        .route(
            "/blood-requests/{id}/accept",
            put(handlers::blood_request::accept_request),
        )
        .route(
            "/blood-requests/{id}/reject",
            put(handlers::blood_request::reject_request),
        )
        .route(
            "/blood-requests/{id}/cancel",
            put(handlers::blood_request::cancel_request),
        )
        .route(
            "/blood-requests/{id}/fulfill",
            put(handlers::blood_request::fulfill_request),
        )
}

/// Notification feed endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/{id}",
            put(handlers::notification::mark_read),
        )
}

/// Health check endpoint (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    use http::Method;
    use tower_http::cors::Any;

    let allowed_origins = &state.config.server.allowed_origins;

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    if allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors
}
