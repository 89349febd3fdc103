//! Animal repository: intake, status changes, relinking, and reads.
//!
//! Every mutation is one unit of work covering family resolution, the animal
//! write, and the audit entries. Unknown animal ids on `update_status` and
//! `relink` are a no-op reported as `Ok(None)`.

use chrono::Utc;
use refuge_core::audit_detail::{RelinkedDetail, StatusChangedDetail};
use refuge_core::entities::{Animal, FamilyDetails, NewAnimal};
use refuge_core::enums::{AuditAction, EntityType};
use refuge_core::validate::require_text;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, parse_datetime, to_detail};
use crate::repos::family::row_to_family;
use crate::service::RefugeService;
use crate::uow::UnitOfWork;

/// Animal columns (0..8) followed by its family's columns (8..14).
pub(crate) const ANIMAL_SELECT: &str = "SELECT a.id, a.name, a.species, a.age, a.description, a.status, a.created_at, a.updated_at,
        f.id, f.name, f.age, f.city, f.created_at, f.updated_at
 FROM animals a JOIN families f ON f.id = a.family_id";

fn row_to_animal(row: &libsql::Row) -> Result<Animal, DatabaseError> {
    Ok(Animal {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        species: row.get::<String>(2)?,
        age: get_u32(row, 3)?,
        description: get_opt_string(row, 4)?,
        status: row.get::<String>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
        family: row_to_family(row, 8)?,
    })
}

pub(crate) async fn collect_animals(mut rows: libsql::Rows) -> Result<Vec<Animal>, DatabaseError> {
    let mut animals = Vec::new();
    while let Some(row) = rows.next().await? {
        animals.push(row_to_animal(&row)?);
    }
    Ok(animals)
}

pub(crate) async fn select_animal(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Option<Animal>, DatabaseError> {
    let mut rows = conn
        .query(&format!("{ANIMAL_SELECT} WHERE a.id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_animal(&row)?)),
        None => Ok(None),
    }
}

async fn reload(conn: &libsql::Connection, id: i64) -> Result<Animal, DatabaseError> {
    select_animal(conn, id).await?.ok_or(DatabaseError::NoResult)
}

impl RefugeService {
    /// Register a new animal and link it to the family named in `family`,
    /// creating or overwriting that family as needed.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the animal or family input is malformed.
    /// - Any error from [`RefugeService::resolve_family`] or the insert; the
    ///   whole unit of work is rolled back.
    pub async fn intake(
        &self,
        animal: &NewAnimal,
        family: &FamilyDetails,
    ) -> Result<Animal, DatabaseError> {
        animal.validate()?;
        family.validate()?;

        let uow = self.begin().await?;
        let result = self.intake_in(&uow, animal, family).await;
        uow.finish(result).await
    }

    async fn intake_in(
        &self,
        uow: &UnitOfWork<'_>,
        animal: &NewAnimal,
        family: &FamilyDetails,
    ) -> Result<Animal, DatabaseError> {
        let family = self.resolve_family(uow, family).await?;
        let conn = uow.conn();
        let now = Utc::now().to_rfc3339();
        // Blank descriptions are stored as NULL, matching how they read back.
        let description = animal
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty());

        conn.execute(
            "INSERT INTO animals (name, species, age, description, status, family_id, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
            libsql::params![
                animal.name.trim(),
                animal.species.trim(),
                i64::from(animal.age),
                description,
                animal.status.trim(),
                family.id,
                now
            ],
        )
        .await?;
        let id = conn.last_insert_rowid();

        self.append_audit(uow, EntityType::Animal, id, AuditAction::Created, None)
            .await?;
        tracing::debug!(animal_id = id, family_id = family.id, "animal registered");
        reload(conn, id).await
    }

    /// Replace an animal's status label.
    ///
    /// Returns `Ok(None)` without writing anything when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank status, or a store failure.
    pub async fn update_status(
        &self,
        animal_id: i64,
        status: &str,
    ) -> Result<Option<Animal>, DatabaseError> {
        require_text(status, "status")?;

        let uow = self.begin().await?;
        let result = self.update_status_in(&uow, animal_id, status.trim()).await;
        uow.finish(result).await
    }

    async fn update_status_in(
        &self,
        uow: &UnitOfWork<'_>,
        animal_id: i64,
        status: &str,
    ) -> Result<Option<Animal>, DatabaseError> {
        let conn = uow.conn();
        let Some(current) = select_animal(conn, animal_id).await? else {
            tracing::debug!(animal_id, "status update for unknown animal ignored");
            return Ok(None);
        };

        conn.execute(
            "UPDATE animals SET status = ?1, updated_at = ?2 WHERE id = ?3",
            libsql::params![status, Utc::now().to_rfc3339(), animal_id],
        )
        .await?;

        let detail = to_detail(&StatusChangedDetail {
            from: current.status,
            to: status.to_string(),
        })?;
        self.append_audit(
            uow,
            EntityType::Animal,
            animal_id,
            AuditAction::StatusChanged,
            Some(detail),
        )
        .await?;
        reload(conn, animal_id).await.map(Some)
    }

    /// Move an animal to the family named in `family`, creating or
    /// overwriting that family. The overwrite is visible to every animal the
    /// family fosters.
    ///
    /// Returns `Ok(None)` without writing anything when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for malformed family input, or any error from
    /// family resolution; the unit of work is rolled back.
    pub async fn relink(
        &self,
        animal_id: i64,
        family: &FamilyDetails,
    ) -> Result<Option<Animal>, DatabaseError> {
        family.validate()?;

        let uow = self.begin().await?;
        let result = self.relink_in(&uow, animal_id, family).await;
        uow.finish(result).await
    }

    async fn relink_in(
        &self,
        uow: &UnitOfWork<'_>,
        animal_id: i64,
        family: &FamilyDetails,
    ) -> Result<Option<Animal>, DatabaseError> {
        let conn = uow.conn();
        let Some(current) = select_animal(conn, animal_id).await? else {
            tracing::debug!(animal_id, "relink for unknown animal ignored");
            return Ok(None);
        };

        let family = self.resolve_family(uow, family).await?;
        conn.execute(
            "UPDATE animals SET family_id = ?1, updated_at = ?2 WHERE id = ?3",
            libsql::params![family.id, Utc::now().to_rfc3339(), animal_id],
        )
        .await?;

        let detail = to_detail(&RelinkedDetail {
            from_family_id: current.family.id,
            to_family_id: family.id,
        })?;
        self.append_audit(
            uow,
            EntityType::Animal,
            animal_id,
            AuditAction::Relinked,
            Some(detail),
        )
        .await?;
        tracing::debug!(
            animal_id,
            from = current.family.id,
            to = family.id,
            "animal relinked"
        );
        reload(conn, animal_id).await.map(Some)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no animal has this id.
    pub async fn get_animal(&self, id: i64) -> Result<Animal, DatabaseError> {
        let _gate = self.db().lock().await;
        select_animal(self.db().conn(), id)
            .await?
            .ok_or(DatabaseError::NotFound {
                entity_type: EntityType::Animal,
                id,
            })
    }

    /// Animals of exactly this species, ordered by id.
    ///
    /// Surrounding whitespace is trimmed from `species` before matching, as it
    /// is on intake. Matching is otherwise exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_by_species(&self, species: &str) -> Result<Vec<Animal>, DatabaseError> {
        let _gate = self.db().lock().await;
        let rows = self
            .db()
            .conn()
            .query(
                &format!("{ANIMAL_SELECT} WHERE a.species = ?1 ORDER BY a.id"),
                [species.trim()],
            )
            .await?;
        collect_animals(rows).await
    }

    /// Every animal, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_all(&self) -> Result<Vec<Animal>, DatabaseError> {
        let _gate = self.db().lock().await;
        let rows = self
            .db()
            .conn()
            .query(&format!("{ANIMAL_SELECT} ORDER BY a.id"), ())
            .await?;
        collect_animals(rows).await
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::ErrorKind;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::helpers::{count_rows, guerrero, new_animal, paco, test_service};

    #[tokio::test]
    async fn intake_creates_animal_and_family() {
        let svc = test_service().await;
        let animal = svc.intake(&paco(), &guerrero()).await.unwrap();

        assert_eq!(animal.name, "Paco");
        assert_eq!(animal.species, "Podenco");
        assert_eq!(animal.age, 14);
        assert_eq!(animal.status, "intake");
        assert_eq!(animal.family.name, "Guerrero");
        assert_eq!(svc.get_animal(animal.id).await.unwrap(), animal);
    }

    #[tokio::test]
    async fn intake_writes_audit_entries() {
        let svc = test_service().await;
        svc.intake(&paco(), &guerrero()).await.unwrap();
        let entries = svc.query_audit(&AuditFilter::default()).await.unwrap();
        let kinds: Vec<_> = entries.iter().map(|e| (e.entity_type, e.action)).collect();
        assert_eq!(
            kinds,
            vec![
                (EntityType::Animal, AuditAction::Created),
                (EntityType::Family, AuditAction::Created)
            ]
        );
    }

    #[tokio::test]
    async fn intake_with_blank_name_writes_nothing() {
        let svc = test_service().await;
        let err = svc
            .intake(&new_animal(" ", "Podenco"), &guerrero())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(count_rows(&svc, EntityType::Family).await, 0);
    }

    #[tokio::test]
    async fn long_description_is_rejected() {
        let svc = test_service().await;
        let animal = NewAnimal {
            description: Some("x".repeat(501)),
            ..paco()
        };
        let err = svc.intake(&animal, &guerrero()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[tokio::test]
    async fn update_status_records_transition() {
        let svc = test_service().await;
        let animal = svc.intake(&paco(), &guerrero()).await.unwrap();
        let updated = svc
            .update_status(animal.id, "Acogida")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, "Acogida");
        assert_eq!(updated.family, animal.family);

        let entries = svc
            .query_audit(&AuditFilter {
                action: Some(AuditAction::StatusChanged),
                ..AuditFilter::default()
            })
            .await
            .unwrap();
        let detail = entries[0].detail.as_ref().unwrap();
        assert_eq!(detail["from"], "intake");
        assert_eq!(detail["to"], "Acogida");
    }

    #[tokio::test]
    async fn update_status_unknown_id_is_noop() {
        let svc = test_service().await;
        assert_eq!(svc.update_status(99, "placed").await.unwrap(), None);
        assert!(svc.query_audit(&AuditFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_status_rejects_blank() {
        let svc = test_service().await;
        let animal = svc.intake(&paco(), &guerrero()).await.unwrap();
        let err = svc.update_status(animal.id, "  ").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(svc.get_animal(animal.id).await.unwrap().status, "intake");
    }

    #[tokio::test]
    async fn relink_moves_animal() {
        let svc = test_service().await;
        let animal = svc.intake(&paco(), &guerrero()).await.unwrap();
        let moved = svc
            .relink(animal.id, &FamilyDetails::new("Ortega", 52, "Jaén"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.family.name, "Ortega");
        assert_ne!(moved.family.id, animal.family.id);
        assert_eq!(count_rows(&svc, EntityType::Family).await, 2);
    }

    #[tokio::test]
    async fn relink_unknown_id_creates_no_family() {
        let svc = test_service().await;
        let result = svc
            .relink(5, &FamilyDetails::new("Ortega", 52, "Jaén"))
            .await
            .unwrap();
        assert_eq!(result, None);
        assert_eq!(count_rows(&svc, EntityType::Family).await, 0);
    }

    #[tokio::test]
    async fn blank_description_is_stored_as_null() {
        let svc = test_service().await;
        let quiet = NewAnimal {
            description: Some("   ".to_string()),
            ..new_animal("Mora", "Galgo")
        };
        let animal = svc.intake(&quiet, &guerrero()).await.unwrap();
        assert_eq!(animal.description, None);

        let mut rows = svc
            .db()
            .conn()
            .query("SELECT description IS NULL FROM animals WHERE id = ?1", [animal.id])
            .await
            .unwrap();
        let is_null = rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap();
        assert_eq!(is_null, 1);
        assert_eq!(svc.get_animal(animal.id).await.unwrap(), animal);
    }

    #[tokio::test]
    async fn find_by_species_filters_and_orders() {
        let svc = test_service().await;
        svc.intake(&paco(), &guerrero()).await.unwrap();
        svc.intake(&new_animal("Mora", "Galgo"), &guerrero())
            .await
            .unwrap();
        svc.intake(&new_animal("Lía", "Podenco"), &guerrero())
            .await
            .unwrap();

        let podencos: Vec<_> = svc
            .find_by_species("Podenco")
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(podencos, vec!["Paco", "Lía"]);
        assert_eq!(svc.find_by_species("  Podenco ").await.unwrap().len(), 2);
        assert!(svc.find_by_species("podenco").await.unwrap().is_empty());
        assert!(svc.find_by_species("Gato").await.unwrap().is_empty());
        assert_eq!(svc.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn get_unknown_animal_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_animal(1).await.unwrap_err();
        assert_eq!(err.to_string(), "animal 1 not found");
    }
}
