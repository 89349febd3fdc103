//! Shared test utilities for refuge-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use refuge_core::entities::{FamilyDetails, NewAnimal};
    use refuge_core::enums::EntityType;

    use crate::RefugeDb;
    use crate::retry::RetryConfig;
    use crate::service::RefugeService;

    /// Create an in-memory `RefugeService` with the default retry policy.
    pub async fn test_service() -> RefugeService {
        let db = RefugeDb::open_local(":memory:").await.unwrap();
        RefugeService::from_db(db, RetryConfig::default())
    }

    pub fn guerrero() -> FamilyDetails {
        FamilyDetails::new("Guerrero", 36, "Sevilla")
    }

    pub fn new_animal(name: &str, species: &str) -> NewAnimal {
        NewAnimal {
            name: name.to_string(),
            species: species.to_string(),
            age: 3,
            description: None,
            status: "intake".to_string(),
        }
    }

    /// Paco, a 14 year old podenco.
    pub fn paco() -> NewAnimal {
        NewAnimal {
            age: 14,
            description: Some("White with a black patch over one eye".to_string()),
            ..new_animal("Paco", "Podenco")
        }
    }

    /// Raw row count for an entity's table, bypassing the gate.
    pub async fn count_rows(svc: &RefugeService, entity: EntityType) -> i64 {
        let mut rows = svc
            .db()
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {}", entity.table()), ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }
}
