//! Shared state and the health check.

use axum::Json;
use serde_json::json;

use crate::models::Envelope;
use crate::services::AuthService;

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(auth_service: AuthService) -> Self {
        Self { auth_service }
    }

    pub fn auth_service(&self) -> &AuthService {
        &self.auth_service
    }
}

/// GET /health: liveness check.
pub async fn health() -> Json<Envelope<serde_json::Value>> {
    Json(Envelope::ok(
        json!({ "status": "ok" }),
        "healthy",
    ))
}
