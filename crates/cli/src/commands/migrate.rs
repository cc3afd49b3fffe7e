//! Database migration command.
//!
//! Migrations live in `crates/dashboard/migrations/` and are embedded into
//! the binary at build time.

use thiserror::Error;
use tracing::info;

use tally_dashboard::db;

/// Errors from running migrations.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: DASHBOARD_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply all pending dashboard migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let database_url = super::database_url().ok_or(MigrationError::MissingDatabaseUrl)?;

    info!("Connecting to dashboard database...");
    let pool = db::create_pool(&database_url).await?;

    info!("Running dashboard migrations...");
    sqlx::migrate!("../dashboard/migrations").run(&pool).await?;

    info!("Dashboard migrations complete!");
    Ok(())
}
