//! Domain model for personnel records.
//!
//! # Responsibility
//! - Define the canonical employee record and the caller-supplied candidate.
//! - Own the field-level validation rules shared by create and update.
//!
//! # Invariants
//! - Every stored record is identified by a stable `EmployeeId`.
//! - `id` and `created_at` are assigned by storage, never by callers.
//! - Deletion is permanent; there is no tombstone state.

pub mod employee;
pub mod validation;
