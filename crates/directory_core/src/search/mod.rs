//! Record filtering.
//!
//! # Responsibility
//! - Provide the single matching predicate used by storage listing and by
//!   any consumer re-filtering an already fetched list.

pub mod filter;
