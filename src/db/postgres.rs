//! PostgreSQL user store.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use tracing::{debug, info};

use super::store::{with_timeout, StoreError, UserStore};
use super::DbPool;
use crate::models::{NewUser, User};

// Postgres caps a statement at 65535 bind parameters; six per user.
const INSERT_BATCH: usize = 1000;

const USER_COLUMNS: &str = "id, username, email, password_hash, address, phone, age, created_at";

#[derive(Clone)]
pub struct PgUserStore {
    pool: DbPool,
    timeout: Duration,
}

impl PgUserStore {
    pub fn new(pool: DbPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Create the `users` table and its unique email index if missing.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        with_timeout(self.timeout, async {
            sqlx::query(
                r#"
                CREATE TABLE IF NOT EXISTS users (
                    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
                    username TEXT NOT NULL,
                    email TEXT NOT NULL,
                    password_hash TEXT NOT NULL,
                    address TEXT NOT NULL,
                    phone TEXT NOT NULL,
                    age INTEGER NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )
                "#,
            )
            .execute(&self.pool)
            .await?;
            sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS users_email_key ON users (email)")
                .execute(&self.pool)
                .await?;
            Ok(())
        })
        .await?;
        info!("users schema ready");
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let query = format!(
            r#"
            INSERT INTO users (username, email, password_hash, address, phone, age)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        with_timeout(self.timeout, async {
            sqlx::query_as::<_, User>(&query)
                .bind(&user.username)
                .bind(&user.email)
                .bind(&user.password_hash)
                .bind(&user.address)
                .bind(&user.phone)
                .bind(user.age)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| match e.as_database_error() {
                    Some(db_err) if db_err.is_unique_violation() => {
                        StoreError::DuplicateKey(user.email.clone())
                    }
                    _ => StoreError::Backend(e),
                })
        })
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
        let query = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let row = with_timeout(self.timeout, async {
            Ok(sqlx::query_as::<_, User>(&query)
                .bind(email)
                .fetch_optional(&self.pool)
                .await?)
        })
        .await?;
        row.ok_or(StoreError::NotFound)
    }

    async fn insert_many(&self, users: Vec<NewUser>) -> Result<u64, StoreError> {
        let mut inserted = 0;
        for batch in users.chunks(INSERT_BATCH) {
            let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
                "INSERT INTO users (username, email, password_hash, address, phone, age) ",
            );
            qb.push_values(batch, |mut row, user| {
                row.push_bind(user.username.clone())
                    .push_bind(user.email.clone())
                    .push_bind(user.password_hash.clone())
                    .push_bind(user.address.clone())
                    .push_bind(user.phone.clone())
                    .push_bind(user.age);
            });
            qb.push(" ON CONFLICT (email) DO NOTHING");

            let result = with_timeout(self.timeout, async {
                Ok(qb.build().execute(&self.pool).await?)
            })
            .await?;
            debug!(batch = batch.len(), inserted = result.rows_affected(), "insert batch");
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }
}
