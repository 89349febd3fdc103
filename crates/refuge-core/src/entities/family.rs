use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validate::require_text;

/// A family fostering one or more animals.
///
/// `name` is the natural key: at most one family row exists per name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Family {
    pub id: i64,
    pub name: String,
    /// Age of the responsible adult.
    pub age: u32,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The values a caller supplies when referencing a family by name.
///
/// Resolving these either creates the family or overwrites `age` and `city`
/// on the existing row with the same name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FamilyDetails {
    pub name: String,
    pub age: u32,
    pub city: String,
}

impl FamilyDetails {
    #[must_use]
    pub fn new(name: impl Into<String>, age: u32, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            city: city.into(),
        }
    }

    /// The lookup key: `name` with surrounding whitespace removed.
    #[must_use]
    pub fn key(&self) -> &str {
        self.name.trim()
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `name` or `city` is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text(&self.name, "family name")?;
        require_text(&self.city, "family city")
    }
}
