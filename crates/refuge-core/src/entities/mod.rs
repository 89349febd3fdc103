//! Entity structs for the Refuge domain.
//!
//! Each persisted entity maps to a table in the libSQL database. All structs
//! derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON output and
//! schema validation.

mod animal;
mod audit;
mod family;

pub use animal::{Animal, NewAnimal};
pub use audit::AuditEntry;
pub use family::{Family, FamilyDetails};
