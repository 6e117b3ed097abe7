//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes
//! - Session middleware and the `AuthSession` extractor
//! - Request/response types

pub mod middleware;
pub(crate) mod response;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use fundtrack_shared::config::SessionConfig;

/// Session behavior shared across handlers.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Fixed session lifetime from issuance.
    pub ttl: chrono::Duration,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Whether to mark the cookie `Secure`.
    pub cookie_secure: bool,
}

impl SessionSettings {
    /// Builds session settings from configuration.
    #[must_use]
    pub fn from_config(config: &SessionConfig) -> Self {
        Self {
            ttl: chrono::Duration::hours(config.ttl_hours),
            cookie_name: config.cookie_name.clone(),
            cookie_secure: config.cookie_secure,
        }
    }
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Session settings.
    pub sessions: Arc<SessionSettings>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
