//! Employee record service.
//!
//! # Responsibility
//! - Implement list/get/create/update/delete over an injected store.
//! - Translate store failures into the service error taxonomy.
//!
//! # Invariants
//! - Validation runs before any store mutation; invalid input writes nothing.
//! - `id` and `created_at` are never taken from caller input.
//! - The service holds no mutable state of its own.
//! - Every failure maps to exactly one `ServiceError` kind.

use crate::model::employee::{Employee, EmployeeCandidate, EmployeeId};
use crate::model::validation::FieldProblems;
use crate::repo::employee_repo::{EmployeeRepository, RepoError};
use crate::search::filter::EmployeeFilter;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure taxonomy for record service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Candidate has one or more required/format problems.
    Validation(FieldProblems),
    /// Another record already holds this email.
    DuplicateEmail(String),
    /// No record exists with this id.
    NotFound(EmployeeId),
    /// Store could not be reached or returned unusable data.
    StoreUnavailable(RepoError),
}

impl ServiceError {
    /// Stable machine-readable code used in logs and responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::NotFound(_) => "not_found",
            Self::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(problems) => write!(f, "validation failed: {problems}"),
            Self::DuplicateEmail(email) => write!(f, "email already exists: {email}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::StoreUnavailable(err) => write!(f, "store unavailable: {err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(problems) => Some(problems),
            Self::StoreUnavailable(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::StoreUnavailable(other),
        }
    }
}

impl From<FieldProblems> for ServiceError {
    fn from(value: FieldProblems) -> Self {
        Self::Validation(value)
    }
}

/// Record service over an injected store handle.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided store implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists records matching `filter`, most recently created first.
    pub fn list_employees(&self, filter: &EmployeeFilter) -> ServiceResult<Vec<Employee>> {
        let result = self.repo.list_employees(filter).map_err(ServiceError::from);
        match &result {
            Ok(items) => debug!(
                "event=employee_list module=service status=ok filtered={} count={}",
                !filter.is_empty(),
                items.len()
            ),
            Err(err) => log_failure("employee_list", None, err),
        }
        result
    }

    /// Gets one record by id.
    ///
    /// # Errors
    /// - `NotFound` when no record has this id.
    pub fn get_employee(&self, id: EmployeeId) -> ServiceResult<Employee> {
        let result = match self.repo.get_employee(id) {
            Ok(Some(employee)) => Ok(employee),
            Ok(None) => Err(ServiceError::NotFound(id)),
            Err(err) => Err(err.into()),
        };
        if let Err(err) = &result {
            log_failure("employee_get", Some(id), err);
        }
        result
    }

    /// Validates and inserts a new record.
    ///
    /// # Errors
    /// - `Validation` with every field problem; nothing is written.
    /// - `DuplicateEmail` when the store rejects the email.
    pub fn create_employee(&self, candidate: EmployeeCandidate) -> ServiceResult<Employee> {
        let result = candidate
            .into_fields()
            .map_err(ServiceError::from)
            .and_then(|fields| self.repo.insert_employee(&fields).map_err(Into::into));
        match &result {
            Ok(employee) => info!(
                "event=employee_create module=service status=ok employee_id={}",
                employee.id
            ),
            Err(err) => log_failure("employee_create", None, err),
        }
        result
    }

    /// Validates and fully replaces the business fields of a record.
    ///
    /// Keeping the record's own email is not a conflict.
    ///
    /// # Errors
    /// - `Validation` with every field problem; nothing is written.
    /// - `NotFound` when no record has this id.
    /// - `DuplicateEmail` when a different record holds the new email.
    pub fn update_employee(
        &self,
        id: EmployeeId,
        candidate: EmployeeCandidate,
    ) -> ServiceResult<Employee> {
        let result = candidate
            .into_fields()
            .map_err(ServiceError::from)
            .and_then(|fields| self.repo.replace_employee(id, &fields).map_err(Into::into));
        match &result {
            Ok(_) => info!("event=employee_update module=service status=ok employee_id={id}"),
            Err(err) => log_failure("employee_update", Some(id), err),
        }
        result
    }

    /// Permanently removes a record and returns its last state.
    ///
    /// # Errors
    /// - `NotFound` when no record has this id.
    pub fn delete_employee(&self, id: EmployeeId) -> ServiceResult<Employee> {
        let result = self.repo.delete_employee(id).map_err(ServiceError::from);
        match &result {
            Ok(_) => info!("event=employee_delete module=service status=ok employee_id={id}"),
            Err(err) => log_failure("employee_delete", Some(id), err),
        }
        result
    }
}

fn log_failure(event: &str, id: Option<EmployeeId>, err: &ServiceError) {
    let id = id.map_or_else(|| "-".to_string(), |id| id.to_string());
    match err {
        ServiceError::StoreUnavailable(source) => warn!(
            "event={event} module=service status=error employee_id={id} error_code={} error={source}",
            err.code()
        ),
        ServiceError::Validation(problems) => info!(
            "event={event} module=service status=rejected employee_id={id} error_code={} fields={}",
            err.code(),
            problems.fields().join(",")
        ),
        _ => info!(
            "event={event} module=service status=rejected employee_id={id} error_code={}",
            err.code()
        ),
    }
}
