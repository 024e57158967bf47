//! Types stored in the admin session.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::panel::Notice;

/// How long a flash message stays visible after it is issued.
pub const FLASH_TTL: TimeDelta = TimeDelta::seconds(5);

/// Session-stored login marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub logged_in_at: DateTime<Utc>,
}

impl CurrentAdmin {
    #[must_use]
    pub fn now() -> Self {
        Self {
            logged_in_at: Utc::now(),
        }
    }
}

/// The single message slot. A new notice replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub notice: Notice,
    pub issued_at: DateTime<Utc>,
}

impl Flash {
    #[must_use]
    pub const fn new(notice: Notice, issued_at: DateTime<Utc>) -> Self {
        Self { notice, issued_at }
    }

    /// Time left before the message clears; `None` once expired.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let left = FLASH_TTL - (now - self.issued_at);
        (left > TimeDelta::zero()).then_some(left)
    }
}

/// Session keys for admin data.
pub mod keys {
    /// Key for the logged-in marker.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the flash message.
    pub const FLASH: &str = "flash";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_expires_after_five_seconds() {
        let issued = Utc::now();
        let flash = Flash::new(Notice::success("Image added successfully"), issued);

        assert_eq!(flash.remaining(issued), Some(FLASH_TTL));
        assert_eq!(
            flash.remaining(issued + TimeDelta::seconds(2)),
            Some(TimeDelta::seconds(3))
        );
        assert_eq!(flash.remaining(issued + TimeDelta::seconds(5)), None);
        assert_eq!(flash.remaining(issued + TimeDelta::minutes(1)), None);
    }
}
