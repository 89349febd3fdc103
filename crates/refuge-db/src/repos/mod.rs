//! Repository modules for all Refuge entities.
//!
//! Each module adds methods to `RefugeService` via `impl RefugeService` blocks,
//! plus crate-private helpers that run on a unit of work's connection.

pub mod animal;
pub mod audit;
pub mod family;
