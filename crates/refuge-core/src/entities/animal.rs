use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Family;
use crate::errors::CoreError;
use crate::validate::{check_description, require_text};

/// An animal in the shelter's care, always linked to exactly one family.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Animal {
    pub id: i64,
    pub name: String,
    pub species: String,
    /// Age in years.
    pub age: u32,
    pub description: Option<String>,
    /// Free-form lifecycle label, e.g. `intake`, `in care`, `placed`.
    pub status: String,
    pub family: Family,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An animal that has not been persisted yet.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewAnimal {
    pub name: String,
    pub species: String,
    pub age: u32,
    pub description: Option<String>,
    pub status: String,
}

impl NewAnimal {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `name`, `species`, or `status` is blank,
    /// or the description exceeds the maximum length.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text(&self.name, "animal name")?;
        require_text(&self.species, "species")?;
        require_text(&self.status, "status")?;
        check_description(self.description.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paco() -> NewAnimal {
        NewAnimal {
            name: "Paco".into(),
            species: "Podenco".into(),
            age: 14,
            description: Some("White dog with a black patch on the face".into()),
            status: "intake".into(),
        }
    }

    #[test]
    fn valid_animal_passes() {
        paco().validate().unwrap();
    }

    #[test]
    fn missing_description_is_fine() {
        let animal = NewAnimal {
            description: None,
            ..paco()
        };
        animal.validate().unwrap();
    }

    #[test]
    fn blank_species_fails() {
        let animal = NewAnimal {
            species: " ".into(),
            ..paco()
        };
        let err = animal.validate().unwrap_err();
        assert!(err.to_string().contains("species"));
    }

    #[test]
    fn blank_status_fails() {
        let animal = NewAnimal {
            status: String::new(),
            ..paco()
        };
        assert!(matches!(animal.validate(), Err(CoreError::Validation(_))));
    }
}
