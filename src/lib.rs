//! User registration and login service.
//!
//! Validates request payloads, hashes passwords with Argon2, persists users in a
//! store with unique emails, and issues JWT bearer tokens on login. Every
//! response uses the `{data, message}` envelope.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod seed;
pub mod services;
pub mod validation;

pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;
pub use services::AuthService;

use axum::routing::{get, post};
use handlers::http;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// Build the API router (register, login, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/health", get(http::health))
        .with_state(state)
        .layer(CatchPanicLayer::custom(middleware::panic_response))
        .layer(TraceLayer::new_for_http())
}
