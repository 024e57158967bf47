//! Session-stored models for the admin panel.

pub mod session;

pub use session::{CurrentAdmin, FLASH_TTL, Flash, keys as session_keys};
