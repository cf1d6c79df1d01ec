//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, filtering and storage into use-case APIs.
//! - Keep transport layers decoupled from storage details.

pub mod employee_service;
