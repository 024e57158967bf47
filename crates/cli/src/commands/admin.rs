//! Admin panel tools.

use std::io::BufRead;

use thiserror::Error;

use fino_integrino_admin::password::{self, PasswordError};

#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Failed to read password: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Password(#[from] PasswordError),
}

/// Read one line from stdin and print its hash for `ADMIN_PASSWORD_HASH`.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or the password is too short.
pub fn hash_password() -> Result<(), AdminError> {
    tracing::info!("Enter the admin panel password, then press Enter");

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    let hash = password::hash_password(line.trim_end_matches(['\r', '\n']))?;

    #[allow(clippy::print_stdout)]
    {
        println!("{hash}");
    }
    Ok(())
}
