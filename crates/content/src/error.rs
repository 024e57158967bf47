//! Content store errors.

use thiserror::Error;

/// Errors that can occur during content store operations.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The store could not be reached.
    #[error("content store unavailable: {0}")]
    Unavailable(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., a reference to a missing image).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl ContentError {
    /// Whether the store was unreachable rather than rejecting the request.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable(_)
                | Self::Database(
                    sqlx::Error::PoolTimedOut
                        | sqlx::Error::PoolClosed
                        | sqlx::Error::Io(_)
                        | sqlx::Error::Tls(_)
                )
        )
    }
}

/// Map a write failure, turning foreign key violations into [`ContentError::Conflict`].
pub(crate) fn map_write_error(e: sqlx::Error) -> ContentError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_foreign_key_violation() {
            return ContentError::Conflict("referenced image does not exist".to_owned());
        }
        if db_err.is_unique_violation() {
            return ContentError::Conflict("duplicate entry".to_owned());
        }
        if db_err.is_check_violation() {
            return ContentError::Conflict("required field is empty".to_owned());
        }
    }
    ContentError::Database(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_classification() {
        assert!(ContentError::Unavailable("down".to_owned()).is_unavailable());
        assert!(ContentError::Database(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(!ContentError::NotFound.is_unavailable());
        assert!(!ContentError::Database(sqlx::Error::RowNotFound).is_unavailable());
    }
}
