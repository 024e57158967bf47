//! Database migration command.
//!
//! Migrations live in `crates/content/migrations/` and are embedded in
//! [`fino_integrino_content::MIGRATOR`].

use thiserror::Error;

use fino_integrino_content::{MIGRATOR, create_pool};

use super::{MissingDatabaseUrl, database_url};

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error(transparent)]
    MissingEnvVar(#[from] MissingDatabaseUrl),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run content database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let url = database_url()?;

    tracing::info!("Connecting to content database...");
    let pool = create_pool(&url).await?;

    tracing::info!("Running content migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Content migrations complete");
    Ok(())
}
