//! Database connection pool using OnceCell pattern.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio::sync::OnceCell;

use crate::error::AuthError;
use crate::settings::Settings;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

/// Get or initialize the database connection pool from [`Settings`].
pub async fn get_pool() -> Result<&'static PgPool, AuthError> {
    POOL.get_or_try_init(|| async {
        let settings = Settings::new()?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.database.max_connections)
            .connect(&settings.database.url)
            .await?;
        Ok(pool)
    })
    .await
}
