//! Error taxonomy for the store layer
//!
//! Every repository failure is translated once, here, into a variant a
//! caller can pattern-match: connectivity outages are retryable, constraint
//! violations are not, and a write that matched no row signals a stale
//! reference rather than malformed data. Reads for a single entity never
//! error on absence; they return `Ok(None)`.

use thiserror::Error;

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failure conditions surfaced by the repositories
#[derive(Error, Debug)]
pub enum StoreError {
    /// Storage backend unreachable (I/O, TLS, pool timed out or closed).
    /// The only retryable condition in the taxonomy.
    #[error("unable to connect to server or database")]
    Unavailable(#[source] sqlx::Error),

    /// A write violated a storage-level constraint (unique, foreign key,
    /// check, not-null). `message` is intended for end-user display.
    #[error("{message}")]
    Integrity {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    /// An update targeted an identifier that matched no existing row.
    #[error("no {entity} row affected for id {id}")]
    ZeroRowsAffected { entity: &'static str, id: i32 },

    /// Username collision on user creation, kept distinct from generic
    /// integrity failures so callers can present a "username taken" message.
    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    /// Password hashing failed or the supplied current password did not
    /// match the stored credential.
    #[error("credential error: {0}")]
    Credential(String),

    /// Any other database error, propagated with its source.
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StoreError {
    /// Whether a caller may reasonably retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Classify a raw sqlx error into the store taxonomy.
    ///
    /// Connection-level failures become [`StoreError::Unavailable`];
    /// constraint violations become [`StoreError::Integrity`] with a generic
    /// message (call sites that know the entity override it); everything
    /// else passes through as [`StoreError::Database`].
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => Self::Unavailable(err),
            sqlx::Error::Database(db) if is_constraint_violation(db.as_ref()) => Self::Integrity {
                message: "data integrity violation".to_string(),
                source: err,
            },
            _ => Self::Database(err),
        }
    }
}

/// True for the constraint classes a write can trip: unique, foreign key,
/// check, and not-null (SQLSTATE 23502, which sqlx has no predicate for).
pub(crate) fn is_constraint_violation(db: &dyn sqlx::error::DatabaseError) -> bool {
    db.is_unique_violation()
        || db.is_foreign_key_violation()
        || db.is_check_violation()
        || db.code().is_some_and(|code| code == "23502")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn pool_timeout_classifies_as_unavailable() {
        let err = StoreError::from_sqlx(sqlx::Error::PoolTimedOut);
        assert_matches!(err, StoreError::Unavailable(_));
        assert!(err.is_retryable());
    }

    #[test]
    fn pool_closed_classifies_as_unavailable() {
        let err = StoreError::from_sqlx(sqlx::Error::PoolClosed);
        assert_matches!(err, StoreError::Unavailable(_));
    }

    #[test]
    fn row_not_found_passes_through_as_database() {
        let err = StoreError::from_sqlx(sqlx::Error::RowNotFound);
        assert_matches!(err, StoreError::Database(_));
        assert!(!err.is_retryable());
    }

    #[test]
    fn zero_rows_is_not_retryable() {
        let err = StoreError::ZeroRowsAffected {
            entity: "pets",
            id: 42,
        };
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "no pets row affected for id 42");
    }

    #[test]
    fn duplicate_username_names_the_offender() {
        let err = StoreError::DuplicateUsername("alice".to_string());
        assert_eq!(err.to_string(), "username already taken: alice");
    }

    #[test]
    fn unavailable_message_is_stable() {
        let err = StoreError::from_sqlx(sqlx::Error::PoolTimedOut);
        assert_eq!(err.to_string(), "unable to connect to server or database");
    }
}
