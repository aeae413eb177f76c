//! User store: contract, PostgreSQL and in-memory backends.

mod memory;
mod pool;
mod postgres;
mod store;

pub use memory::MemoryUserStore;
pub use pool::{create_pool, DbPool};
pub use postgres::PgUserStore;
pub use store::{with_timeout, StoreError, UserStore};

use std::sync::Arc;

use tracing::info;

use crate::config::{Config, StoreBackend};

/// Open the configured store. For Postgres this connects and ensures the schema.
pub async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn UserStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = create_pool(&config.database_url, config.store_timeout).await?;
            let store = PgUserStore::new(pool, config.store_timeout);
            store.ensure_schema().await?;
            info!("using postgres user store");
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            info!("using in-memory user store");
            Ok(Arc::new(MemoryUserStore::new()))
        }
    }
}
