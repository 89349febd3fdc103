//! Family repository: name-keyed resolution and reads.
//!
//! A family is identified by its trimmed name. [`RefugeService::resolve_family`]
//! is the only writer: it looks the name up, then inserts a new row or
//! overwrites `age` and `city` on the single existing one.
//!
//! Two guards keep names unique. The `idx_families_name` unique index makes a
//! duplicate insert fail instead of silently succeeding; the resolver then
//! looks the name up again and updates the row that won. Units of work start
//! with `BEGIN IMMEDIATE`, so between connections the lookup and the write
//! already happen under one write lock and the race window is closed.

use chrono::Utc;
use refuge_core::audit_detail::FamilyOverwrittenDetail;
use refuge_core::entities::{Animal, Family, FamilyDetails};
use refuge_core::enums::{AuditAction, EntityType};

use crate::error::DatabaseError;
use crate::helpers::{get_u32, parse_datetime, to_detail};
use crate::repos::animal::{ANIMAL_SELECT, collect_animals};
use crate::retry::is_unique_violation;
use crate::service::RefugeService;
use crate::uow::UnitOfWork;

const FAMILY_SELECT: &str = "SELECT id, name, age, city, created_at, updated_at FROM families";

/// Parse six family columns starting at `offset`.
pub(crate) fn row_to_family(row: &libsql::Row, offset: i32) -> Result<Family, DatabaseError> {
    Ok(Family {
        id: row.get::<i64>(offset)?,
        name: row.get::<String>(offset + 1)?,
        age: get_u32(row, offset + 2)?,
        city: row.get::<String>(offset + 3)?,
        created_at: parse_datetime(&row.get::<String>(offset + 4)?)?,
        updated_at: parse_datetime(&row.get::<String>(offset + 5)?)?,
    })
}

/// Every family stored under `name`. More than one means the store is corrupt.
pub(crate) async fn families_named(
    conn: &libsql::Connection,
    name: &str,
) -> Result<Vec<Family>, DatabaseError> {
    let mut rows = conn
        .query(&format!("{FAMILY_SELECT} WHERE name = ?1 ORDER BY id"), [name])
        .await?;
    let mut families = Vec::new();
    while let Some(row) = rows.next().await? {
        families.push(row_to_family(&row, 0)?);
    }
    Ok(families)
}

pub(crate) async fn select_family(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Option<Family>, DatabaseError> {
    let mut rows = conn
        .query(&format!("{FAMILY_SELECT} WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_family(&row, 0)?)),
        None => Ok(None),
    }
}

fn single_family(name: &str, mut families: Vec<Family>) -> Result<Option<Family>, DatabaseError> {
    match families.len() {
        0 => Ok(None),
        1 => Ok(families.pop()),
        count => Err(DatabaseError::ConsistencyViolation {
            name: name.to_string(),
            count,
        }),
    }
}

impl RefugeService {
    /// Find-or-create the family named by `details`, overwriting `age` and
    /// `city` when it already exists.
    ///
    /// Must run inside `uow`; the caller commits or rolls back. Performs
    /// exactly one write to `families` and records it in the audit trail.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the name or city is blank (nothing is read).
    /// - `ConsistencyViolation` if several families already share the name.
    /// - `Contention` if every attempt lost a uniqueness race.
    /// - Any store failure from the underlying queries.
    pub async fn resolve_family(
        &self,
        uow: &UnitOfWork<'_>,
        details: &FamilyDetails,
    ) -> Result<Family, DatabaseError> {
        details.validate()?;
        let name = details.key();
        let city = details.city.trim();
        let conn = uow.conn();
        let max_attempts = self.retry().max_attempts;

        for attempt in 1..=max_attempts {
            let existing = single_family(name, families_named(conn, name).await?)?;

            let Some(existing) = existing else {
                let now = Utc::now().to_rfc3339();
                let inserted = conn
                    .execute(
                        "INSERT INTO families (name, age, city, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?4)",
                        libsql::params![name, i64::from(details.age), city, now],
                    )
                    .await;
                match inserted {
                    Ok(_) => {}
                    Err(e) if is_unique_violation(&e) => {
                        tracing::warn!(name, attempt, "family inserted concurrently, looking it up again");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                }

                let id = conn.last_insert_rowid();
                self.append_audit(uow, EntityType::Family, id, AuditAction::Created, None)
                    .await?;
                tracing::debug!(family_id = id, name, "family created");
                return select_family(conn, id).await?.ok_or(DatabaseError::NoResult);
            };

            conn.execute(
                "UPDATE families SET age = ?1, city = ?2, updated_at = ?3 WHERE id = ?4",
                libsql::params![
                    i64::from(details.age),
                    city,
                    Utc::now().to_rfc3339(),
                    existing.id
                ],
            )
            .await?;
            let detail = to_detail(&FamilyOverwrittenDetail {
                previous_age: existing.age,
                previous_city: existing.city.clone(),
                age: details.age,
                city: city.to_string(),
            })?;
            self.append_audit(
                uow,
                EntityType::Family,
                existing.id,
                AuditAction::Updated,
                Some(detail),
            )
            .await?;
            tracing::debug!(family_id = existing.id, name, "family overwritten");
            return select_family(conn, existing.id)
                .await?
                .ok_or(DatabaseError::NoResult);
        }

        Err(DatabaseError::Contention {
            name: name.to_string(),
            attempts: max_attempts,
        })
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no family has this id.
    pub async fn get_family(&self, id: i64) -> Result<Family, DatabaseError> {
        let _gate = self.db().lock().await;
        select_family(self.db().conn(), id)
            .await?
            .ok_or(DatabaseError::NotFound {
                entity_type: EntityType::Family,
                id,
            })
    }

    /// Look a family up by name (trimmed).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ConsistencyViolation` if the name is duplicated.
    pub async fn find_family_by_name(&self, name: &str) -> Result<Option<Family>, DatabaseError> {
        let name = name.trim();
        let _gate = self.db().lock().await;
        single_family(name, families_named(self.db().conn(), name).await?)
    }

    /// All families, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_families(&self) -> Result<Vec<Family>, DatabaseError> {
        let _gate = self.db().lock().await;
        let mut rows = self
            .db()
            .conn()
            .query(&format!("{FAMILY_SELECT} ORDER BY id"), ())
            .await?;
        let mut families = Vec::new();
        while let Some(row) = rows.next().await? {
            families.push(row_to_family(&row, 0)?);
        }
        Ok(families)
    }

    /// Animals currently fostered by a family, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no family has this id.
    pub async fn list_family_animals(&self, family_id: i64) -> Result<Vec<Animal>, DatabaseError> {
        let _gate = self.db().lock().await;
        let conn = self.db().conn();
        if select_family(conn, family_id).await?.is_none() {
            return Err(DatabaseError::NotFound {
                entity_type: EntityType::Family,
                id: family_id,
            });
        }
        let rows = conn
            .query(
                &format!("{ANIMAL_SELECT} WHERE a.family_id = ?1 ORDER BY a.id"),
                [family_id],
            )
            .await?;
        collect_animals(rows).await
    }
}
