//! Auth HTTP handlers: register, login.

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;

use crate::error::{AppError, AppResult};
use crate::handlers::http::AppState;
use crate::models::{Envelope, LoginInput, LoginView, RegisterInput, UserView};

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterInput>, AppError>,
) -> AppResult<(StatusCode, Json<Envelope<UserView>>)> {
    let user = state.auth_service().register_user(body).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(user, "user created successfully")),
    ))
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginInput>, AppError>,
) -> AppResult<Json<Envelope<LoginView>>> {
    let view = state.auth_service().login_user(body).await?;
    Ok(Json(Envelope::ok(view, "user login successfully")))
}
