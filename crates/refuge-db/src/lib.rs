//! # refuge-db
//!
//! libSQL persistence for Refuge: animals, the foster families hosting them,
//! and the audit trail of every mutation.
//!
//! The design-bearing piece is family resolution (`repos::family`): a family
//! is referenced by name from independent operations, and the store must
//! never hold two families with the same name. Every mutation runs inside one
//! [`uow::UnitOfWork`] so "resolve family, then write animal" commits or rolls
//! back as a whole.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29).

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod retry;
pub mod service;
pub mod uow;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

/// Milliseconds `SQLite` waits on a locked database before reporting it busy.
const BUSY_TIMEOUT_MS: u32 = 5000;

/// Central database handle.
///
/// Wraps a libSQL database, its connection, and the gate that keeps the
/// connection to one transaction at a time.
pub struct RefugeDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    gate: Mutex<()>,
}

impl RefugeDb {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        // PRAGMA busy_timeout echoes the new value back as a row.
        let mut rows = conn
            .query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"), ())
            .await?;
        rows.next().await?;
        drop(rows);

        let refuge_db = Self {
            db,
            conn,
            gate: Mutex::new(()),
        };
        refuge_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(refuge_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    ///
    /// Bypasses the gate; repo methods go through [`Self::lock`] or a
    /// [`uow::UnitOfWork`] instead.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Wait for exclusive use of the connection.
    pub(crate) async fn lock(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().await
    }
}

#[cfg(test)]
mod test_support;
