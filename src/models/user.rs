//! User record, store input, request inputs and outward views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Stored user. Not `Serialize`: the password hash never leaves the service.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub phone: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
}

/// User as handed to the store; the id and timestamp are assigned there.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub address: String,
    pub phone: String,
    pub age: i32,
}

/// Body of `POST /register`. Absent fields decode to empty values and are
/// reported by validation.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct RegisterInput {
    #[validate(
        custom(function = "required"),
        length(min = 3, message = "username must be at least 3 characters")
    )]
    pub username: String,
    #[validate(
        custom(function = "required"),
        email(message = "email must be a valid email address")
    )]
    pub email: String,
    #[validate(
        custom(function = "required"),
        length(min = 6, message = "password must be at least 6 characters")
    )]
    pub password: String,
    #[validate(custom(function = "required"))]
    pub address: String,
    #[validate(custom(function = "required"))]
    pub phone: String,
    #[validate(range(min = 1, message = "age must be a positive number"))]
    pub age: i32,
}

/// Body of `POST /login`. The password length rule is a registration rule;
/// a short password here is just a wrong password.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginInput {
    #[validate(
        custom(function = "required"),
        email(message = "email must be a valid email address")
    )]
    pub email: String,
    #[validate(custom(function = "required"))]
    pub password: String,
}

/// Rejects only the empty string; whitespace counts as a value.
fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Sanitized user returned by registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub username: String,
    pub email: String,
    pub address: String,
    pub age: i32,
    pub phone: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            address: user.address.clone(),
            age: user.age,
            phone: user.phone.clone(),
        }
    }
}

/// User plus the bearer token issued by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginView {
    #[serde(flatten)]
    pub user: UserView,
    pub token: String,
}

/// Canonical form of an email used for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
