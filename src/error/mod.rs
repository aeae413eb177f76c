//! Application error types and their HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::db::StoreError;
use crate::models::Envelope;
use crate::validation::FieldErrors;

/// Application-level errors. Only [`IntoResponse`] turns these into statuses.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid request format : {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] FieldErrors),

    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store(StoreError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        } else {
            warn!(error = %self, %status, "request rejected");
        }

        match self {
            AppError::Validation(fields) => (status, Json(Envelope::error(fields))).into_response(),
            other => (status, Json(Envelope::error(other.to_string()))).into_response(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
