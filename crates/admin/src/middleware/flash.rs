//! One-slot flash messages carried across post/redirect/get.

use chrono::Utc;
use tower_sessions::Session;

use crate::models::{Flash, session_keys};
use crate::panel::Notice;

/// Store a notice, replacing any previous one.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_flash(
    session: &Session,
    notice: Notice,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(session_keys::FLASH, Flash::new(notice, Utc::now()))
        .await
}

/// Remove and return the flash if it has not expired yet.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>, tower_sessions::session::Error> {
    let flash: Option<Flash> = session.remove(session_keys::FLASH).await?;
    Ok(flash.filter(|flash| flash.remaining(Utc::now()).is_some()))
}
