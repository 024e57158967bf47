//! Subcommand implementations.

pub mod admin;
pub mod content;
pub mod migrate;
pub mod seed;

use secrecy::SecretString;
use thiserror::Error;

/// The content database URL was not configured.
#[derive(Debug, Error)]
#[error("Missing environment variable: CONTENT_DATABASE_URL (or DATABASE_URL)")]
pub struct MissingDatabaseUrl;

/// `CONTENT_DATABASE_URL`, falling back to `DATABASE_URL`.
///
/// # Errors
///
/// Returns [`MissingDatabaseUrl`] if neither is set.
pub fn database_url() -> Result<SecretString, MissingDatabaseUrl> {
    dotenvy::dotenv().ok();

    std::env::var("CONTENT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| MissingDatabaseUrl)
}
