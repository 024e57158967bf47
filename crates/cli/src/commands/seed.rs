//! Seed command.

use std::path::Path;

use thiserror::Error;

use fino_integrino_content::{ContentError, PgContentClient, SeedError, SeedFile, apply_seed};

use super::{MissingDatabaseUrl, database_url};

#[derive(Debug, Error)]
pub enum SeedCommandError {
    #[error(transparent)]
    MissingEnvVar(#[from] MissingDatabaseUrl),

    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Seed(#[from] SeedError),
}

/// Load `file` into the content store.
///
/// The file is parsed and checked before connecting, so a bad file never
/// leaves a half-seeded store.
///
/// # Errors
///
/// Returns an error if the file is invalid or a write fails.
pub async fn run(file: &Path) -> Result<(), SeedCommandError> {
    let seed = SeedFile::from_path(file).await?;
    let problems = seed.validate();
    if !problems.is_empty() {
        return Err(SeedError::Invalid(problems).into());
    }

    let client = PgContentClient::connect(&database_url()?).await?;
    let summary = apply_seed(&client, &seed).await?;

    tracing::info!(
        images = summary.images,
        products = summary.products,
        retailers = summary.retailers,
        hero = summary.hero,
        "Seeded content store from {}",
        file.display()
    );
    Ok(())
}
