//! Entity types and audit actions for Refuge.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for the value stored in SQL.
//!
//! Animal status is deliberately not an enum: any non-empty label may replace
//! any other.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    StatusChanged,
    Relinked,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::StatusChanged => "status_changed",
            Self::Relinked => "relinked",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Animal,
    Family,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Animal => "animal",
            Self::Family => "family",
        }
    }

    /// SQL table backing this entity type.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Animal => "animals",
            Self::Family => "families",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", AuditAction::StatusChanged), "status_changed");
        assert_eq!(format!("{}", AuditAction::Relinked), "relinked");
        assert_eq!(format!("{}", EntityType::Family), "family");
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&AuditAction::StatusChanged).unwrap();
        assert_eq!(json, "\"status_changed\"");
        let parsed: EntityType = serde_json::from_str("\"animal\"").unwrap();
        assert_eq!(parsed, EntityType::Animal);
    }

    #[test]
    fn tables_are_distinct() {
        assert_eq!(EntityType::Animal.table(), "animals");
        assert_eq!(EntityType::Family.table(), "families");
    }
}
