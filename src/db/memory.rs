//! In-process user store keyed by email.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::{StoreError, UserStore};
use crate::models::{NewUser, User};

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

fn into_user(user: NewUser) -> User {
    User {
        id: Uuid::new_v4(),
        username: user.username,
        email: user.email,
        password_hash: user.password_hash,
        address: user.address,
        phone: user.phone,
        age: user.age,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(StoreError::DuplicateKey(user.email));
        }
        let user = into_user(user);
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        self.users
            .read()
            .await
            .get(email)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert_many(&self, batch: Vec<NewUser>) -> Result<u64, StoreError> {
        let mut users = self.users.write().await;
        let mut inserted = 0;
        for user in batch {
            if users.contains_key(&user.email) {
                continue;
            }
            let user = into_user(user);
            users.insert(user.email.clone(), user);
            inserted += 1;
        }
        Ok(inserted)
    }
}
