use sqlx::migrate::{MigrateError, Migrator};
use sqlx::{Pool, Postgres};
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Apply all pending migrations from `migrations/`.
///
/// Safe to run repeatedly; sqlx records applied versions in `_sqlx_migrations`.
pub async fn run_migrations(pool: &Pool<Postgres>) -> Result<(), MigrateError> {
    info!("Running database migrations...");
    MIGRATOR.run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}
