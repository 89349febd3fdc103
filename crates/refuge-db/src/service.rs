//! Service layer owning the database handle and its retry policy.
//!
//! All repo methods are implemented as `impl RefugeService` blocks in
//! [`crate::repos`].
//!
//! Every mutation method follows this protocol:
//! 1. Validate input (no store access on failure)
//! 2. Begin a [`UnitOfWork`]
//! 3. Resolve the family and execute SQL through the unit of work
//! 4. Append audit entries (inside the unit of work)
//! 5. Commit, or roll back on any error
//!
//! Read methods take the connection gate themselves. They must not be called
//! while the same task holds a `UnitOfWork`; code running inside one uses the
//! `uow.conn()` helpers in each repo instead.

use crate::RefugeDb;
use crate::error::DatabaseError;
use crate::retry::RetryConfig;
use crate::uow::UnitOfWork;

/// Orchestrates animal and family persistence with an audit trail.
///
/// `Send + Sync`: share it across tasks through an `Arc`.
pub struct RefugeService {
    db: RefugeDb,
    retry: RetryConfig,
}

impl RefugeService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    /// * `retry` - Lock and uniqueness-race retry policy.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str, retry: RetryConfig) -> Result<Self, DatabaseError> {
        let db = RefugeDb::open_local(db_path).await?;
        Ok(Self { db, retry })
    }

    /// Create from an existing `RefugeDb` (for testing).
    #[must_use]
    pub const fn from_db(db: RefugeDb, retry: RetryConfig) -> Self {
        Self { db, retry }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RefugeDb {
        &self.db
    }

    #[must_use]
    pub const fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Begin a unit of work on this service's database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started.
    pub async fn begin(&self) -> Result<UnitOfWork<'_>, DatabaseError> {
        UnitOfWork::begin(&self.db, &self.retry).await
    }
}
