//! # refuge-core
//!
//! Core types, validation, and error types for Refuge.
//!
//! This crate provides the foundational types shared across all Refuge crates:
//! - Entity structs for the shelter domain (animals and the families hosting them)
//! - Input structs (`NewAnimal`, `FamilyDetails`) with their validation rules
//! - Entity type and audit action enums
//! - Cross-cutting error types
//! - Audit detail sub-types

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod validate;
