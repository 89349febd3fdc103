//! Unit of work: one immediate transaction with guaranteed release.
//!
//! A `UnitOfWork` owns the connection gate for its whole lifetime, so no other
//! operation in this process can interleave statements on the shared
//! connection. The transaction starts with `BEGIN IMMEDIATE`, which takes the
//! database write lock up front: a family lookup made inside the unit of work
//! cannot be invalidated by another connection before the matching insert.
//!
//! Every scope ends in exactly one of [`UnitOfWork::commit`] or
//! [`UnitOfWork::rollback`]; [`UnitOfWork::finish`] picks one from a result.
//! If the future owning a unit of work is dropped mid-flight, the next
//! [`UnitOfWork::begin`] rolls the abandoned transaction back before starting.

use libsql::TransactionBehavior;
use tokio::sync::MutexGuard;

use crate::RefugeDb;
use crate::error::DatabaseError;
use crate::retry::{RetryConfig, is_busy};

/// An open transaction holding exclusive use of the connection.
pub struct UnitOfWork<'a> {
    // Declared before the guard so the transaction is released first on drop.
    tx: libsql::Transaction,
    _gate: MutexGuard<'a, ()>,
}

impl<'a> UnitOfWork<'a> {
    /// Acquire the gate and begin an immediate transaction.
    ///
    /// Retries with backoff while another connection holds the write lock.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the transaction cannot be started within
    /// `retry.max_attempts` attempts.
    pub async fn begin(db: &'a RefugeDb, retry: &RetryConfig) -> Result<Self, DatabaseError> {
        let gate = db.lock().await;
        let conn = db.conn();

        if !conn.is_autocommit() {
            tracing::warn!("rolling back a transaction left open by a cancelled operation");
            conn.execute("ROLLBACK", ()).await?;
        }

        let mut attempt = 1;
        let tx = loop {
            match conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .await
            {
                Ok(tx) => break tx,
                Err(e) if is_busy(&e) && attempt < retry.max_attempts => {
                    let delay = retry.delay_for(attempt);
                    tracing::warn!(attempt, ?delay, "database locked, retrying transaction start");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        tracing::debug!("unit of work started");
        Ok(Self { tx, _gate: gate })
    }

    /// The transaction's connection. All statements of the unit of work go here.
    #[must_use]
    pub fn conn(&self) -> &libsql::Connection {
        &self.tx
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the COMMIT fails; the transaction is then
    /// rolled back by the store.
    pub async fn commit(self) -> Result<(), DatabaseError> {
        self.tx.commit().await?;
        tracing::debug!("unit of work committed");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the ROLLBACK statement fails.
    pub async fn rollback(self) -> Result<(), DatabaseError> {
        self.tx.rollback().await?;
        tracing::debug!("unit of work rolled back");
        Ok(())
    }

    /// Commit on `Ok`, roll back on `Err`, and hand the result back.
    ///
    /// A rollback failure is logged; the original error is the one returned.
    ///
    /// # Errors
    ///
    /// Returns the operation's error, or the commit error if committing fails.
    pub async fn finish<T>(self, result: Result<T, DatabaseError>) -> Result<T, DatabaseError> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(error) => {
                if let Err(rollback_error) = self.rollback().await {
                    tracing::error!(%rollback_error, %error, "rollback failed after operation error");
                }
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn count_families(db: &RefugeDb) -> i64 {
        let mut rows = db
            .conn()
            .query("SELECT COUNT(*) FROM families", ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }

    async fn insert_family(uow: &UnitOfWork<'_>) {
        uow.conn()
            .execute(
                "INSERT INTO families (name, age, city) VALUES ('Guerrero', 36, 'Sevilla')",
                (),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn commit_persists() {
        let db = RefugeDb::open_local(":memory:").await.unwrap();
        let uow = UnitOfWork::begin(&db, &RetryConfig::default()).await.unwrap();
        insert_family(&uow).await;
        uow.commit().await.unwrap();
        assert_eq!(count_families(&db).await, 1);
    }

    #[tokio::test]
    async fn rollback_discards() {
        let db = RefugeDb::open_local(":memory:").await.unwrap();
        let uow = UnitOfWork::begin(&db, &RetryConfig::default()).await.unwrap();
        insert_family(&uow).await;
        uow.rollback().await.unwrap();
        assert_eq!(count_families(&db).await, 0);
        assert!(db.conn().is_autocommit());
    }

    #[tokio::test]
    async fn finish_rolls_back_on_error() {
        let db = RefugeDb::open_local(":memory:").await.unwrap();
        let uow = UnitOfWork::begin(&db, &RetryConfig::default()).await.unwrap();
        insert_family(&uow).await;
        let result: Result<(), _> = uow
            .finish(Err(DatabaseError::InvalidState("forced".into())))
            .await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
        assert_eq!(count_families(&db).await, 0);
    }

    #[tokio::test]
    async fn begin_recovers_abandoned_transaction() {
        let db = RefugeDb::open_local(":memory:").await.unwrap();
        db.conn().execute("BEGIN", ()).await.unwrap();
        db.conn()
            .execute(
                "INSERT INTO families (name, age, city) VALUES ('Orphan', 50, 'Cádiz')",
                (),
            )
            .await
            .unwrap();
        assert!(!db.conn().is_autocommit());

        let uow = UnitOfWork::begin(&db, &RetryConfig::default()).await.unwrap();
        uow.commit().await.unwrap();
        assert_eq!(count_families(&db).await, 0, "abandoned insert must not survive");
    }
}
