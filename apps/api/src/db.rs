use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::Config;

/// Creates the PostgreSQL connection pool backing the matching service.
/// Pool size is taken from `DB_POOL_SIZE` via `Config`.
pub async fn create_pool(config: &Config) -> Result<PgPool> {
    info!(
        "Connecting to the HireMatch database (pool size {})",
        config.db_pool_size
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.db_pool_size)
        .connect(&config.database_url)
        .await?;

    info!("HireMatch database pool ready");
    Ok(pool)
}
