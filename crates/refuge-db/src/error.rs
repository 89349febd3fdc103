//! Database error types for refuge-db.

use refuge_core::enums::EntityType;
use refuge_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Malformed input, rejected before touching the store.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The store already holds more than one family with the same name.
    #[error("Consistency violation: {count} families share the name '{name}'")]
    ConsistencyViolation { name: String, count: usize },

    /// A referenced row does not exist.
    #[error("{entity_type} {id} not found")]
    NotFound { entity_type: EntityType, id: i64 },

    /// Family resolution kept losing uniqueness races.
    #[error("Family '{name}' still conflicting after {attempts} attempts")]
    Contention { name: String, attempts: u32 },

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Coarse classification callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    ConsistencyViolation,
    NotFound,
    StoreFailure,
}

impl DatabaseError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::ConsistencyViolation { .. } => ErrorKind::ConsistencyViolation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Contention { .. }
            | Self::Query(_)
            | Self::Migration(_)
            | Self::NoResult
            | Self::InvalidState(_)
            | Self::LibSql(_)
            | Self::Other(_) => ErrorKind::StoreFailure,
        }
    }
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => Self::InvalidArgument(msg),
            CoreError::Other(e) => Self::Other(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_invalid_argument() {
        let err: DatabaseError = CoreError::Validation("family name must not be empty".into()).into();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("family name"));
    }

    #[test]
    fn kinds_are_distinct() {
        let consistency = DatabaseError::ConsistencyViolation {
            name: "Guerrero".into(),
            count: 2,
        };
        let not_found = DatabaseError::NotFound {
            entity_type: EntityType::Animal,
            id: 9,
        };
        assert_eq!(consistency.kind(), ErrorKind::ConsistencyViolation);
        assert_eq!(not_found.kind(), ErrorKind::NotFound);
        assert_eq!(DatabaseError::NoResult.kind(), ErrorKind::StoreFailure);
        assert_eq!(not_found.to_string(), "animal 9 not found");
    }
}
