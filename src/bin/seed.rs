//! Bulk-insert synthetic users through the configured store.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use userauth::auth::password;
use userauth::config::Config;
use userauth::{db, seed};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!("config: {}", e))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let count: usize = match std::env::var("SEED_COUNT") {
        Ok(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("SEED_COUNT must be a number"))?,
        Err(_) => 1000,
    };
    let seed_password = std::env::var("SEED_PASSWORD").unwrap_or_else(|_| "test12345".to_string());

    let store = db::open_store(&config).await?;
    let password_hash = password::hash_password(&seed_password)?;
    let users = seed::fake_users(&mut rand::thread_rng(), count, &password_hash);

    let inserted = store.insert_many(users).await?;
    tracing::info!(requested = count, inserted, "seed users done");
    Ok(())
}
