//! Record store contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract the record service depends on.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Email uniqueness is enforced by the store itself, atomically.
//! - Duplicate key and missing id are reported as distinct errors.

pub mod employee_repo;
