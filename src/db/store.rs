//! The user store contract shared by every backend.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewUser, User};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate key: email {0} already exists")]
    DuplicateKey(String),

    #[error("user not found")]
    NotFound,

    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Backend(#[from] sqlx::Error),
}

/// Persistence for user records, keyed by email.
///
/// Email uniqueness is the store's job: `create` must fail with
/// [`StoreError::DuplicateKey`] when the email is taken.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return it with its generated id.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError>;

    /// Unordered bulk insert; users whose email already exists are skipped.
    /// Returns how many were inserted.
    async fn insert_many(&self, users: Vec<NewUser>) -> Result<u64, StoreError>;
}

/// Bound a store operation by `limit`.
pub async fn with_timeout<T, F>(limit: Duration, op: F) -> Result<T, StoreError>
where
    F: Future<Output = Result<T, StoreError>>,
{
    match tokio::time::timeout(limit, op).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(limit)),
    }
}
