//! Core domain logic for the employee directory.
//! This crate is the single source of truth for record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{
    Employee, EmployeeCandidate, EmployeeFields, EmployeeId, InvalidEmployeeId,
};
pub use model::validation::{validate_candidate, FieldProblems};
pub use repo::employee_repo::{
    EmployeeRepository, RepoError, RepoResult, SqliteEmployeeRepository,
};
pub use search::filter::{filter_employees, EmployeeFilter};
pub use service::employee_service::{EmployeeService, ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
