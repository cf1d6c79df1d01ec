//! Use-case level entry points for the employee directory.
//!
//! # Responsibility
//! - Translate raw request parts into record service calls.
//! - Translate service results into status + JSON envelopes.
//!
//! # Invariants
//! - Every call opens its own store connection, so calls are independent and
//!   may run concurrently from different threads.
//! - Functions never panic; store bootstrap failures become 500 responses.
//! - Ids that cannot be parsed cannot name a record and yield 404.

use crate::envelope::{ApiResponse, STATUS_CREATED, STATUS_INTERNAL_ERROR, STATUS_OK};
use directory_core::db::open_db;
use directory_core::{
    EmployeeCandidate, EmployeeFilter, EmployeeId, EmployeeService, ServiceResult,
    SqliteEmployeeRepository,
};
use log::debug;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

const MSG_CREATED: &str = "Employee created successfully";
const MSG_UPDATED: &str = "Employee updated successfully";
const MSG_DELETED: &str = "Employee deleted successfully";
const MSG_HEALTHY: &str = "Server is running";

/// Request adapter bound to one database file.
#[derive(Debug, Clone)]
pub struct DirectoryApi {
    db_path: PathBuf,
}

impl DirectoryApi {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Lists records, optionally narrowed by `name` and `department`.
    ///
    /// Success body: `{ success, count, data }`.
    pub fn list(&self, name: Option<&str>, department: Option<&str>) -> ApiResponse {
        let filter = EmployeeFilter::new(name.map(str::to_owned), department.map(str::to_owned));
        let response = match self.with_service(|service| service.list_employees(&filter)) {
            Ok(employees) => {
                let count = employees.len();
                let mut response = ApiResponse::data(STATUS_OK, None, &employees);
                if let Value::Object(body) = &mut response.body {
                    body.insert("count".to_string(), json!(count));
                }
                response
            }
            Err(response) => response,
        };
        log_response("list", &response);
        response
    }

    pub fn get(&self, id: &str) -> ApiResponse {
        let response = match parse_id(id) {
            Some(id) => self
                .with_service(|service| service.get_employee(id))
                .map_or_else(|err| err, |employee| ApiResponse::data(STATUS_OK, None, &employee)),
            None => ApiResponse::not_found(),
        };
        log_response("get", &response);
        response
    }

    /// Creates a record from body fields `name, role, department, email`.
    pub fn create(&self, body: &Value) -> ApiResponse {
        let candidate = candidate_from_body(body);
        let response = self
            .with_service(|service| service.create_employee(candidate))
            .map_or_else(
                |err| err,
                |employee| ApiResponse::data(STATUS_CREATED, Some(MSG_CREATED), &employee),
            );
        log_response("create", &response);
        response
    }

    /// Fully replaces the business fields of record `id`.
    pub fn update(&self, id: &str, body: &Value) -> ApiResponse {
        let response = match parse_id(id) {
            Some(id) => {
                let candidate = candidate_from_body(body);
                self.with_service(|service| service.update_employee(id, candidate))
                    .map_or_else(
                        |err| err,
                        |employee| ApiResponse::data(STATUS_OK, Some(MSG_UPDATED), &employee),
                    )
            }
            None => ApiResponse::not_found(),
        };
        log_response("update", &response);
        response
    }

    /// Deletes record `id`, returning its final state.
    pub fn delete(&self, id: &str) -> ApiResponse {
        let response = match parse_id(id) {
            Some(id) => self
                .with_service(|service| service.delete_employee(id))
                .map_or_else(
                    |err| err,
                    |employee| ApiResponse::data(STATUS_OK, Some(MSG_DELETED), &employee),
                ),
            None => ApiResponse::not_found(),
        };
        log_response("delete", &response);
        response
    }

    fn with_service<T>(
        &self,
        f: impl FnOnce(&EmployeeService<SqliteEmployeeRepository<'_>>) -> ServiceResult<T>,
    ) -> Result<T, ApiResponse> {
        let conn = open_db(&self.db_path).map_err(|err| {
            ApiResponse::failure(STATUS_INTERNAL_ERROR, format!("store unavailable: {err}"))
        })?;
        let repo = SqliteEmployeeRepository::try_new(&conn).map_err(|err| {
            ApiResponse::failure(STATUS_INTERNAL_ERROR, format!("store unavailable: {err}"))
        })?;
        let service = EmployeeService::new(repo);
        f(&service).map_err(ApiResponse::from)
    }
}

/// Liveness probe; does not touch the store.
pub fn health() -> ApiResponse {
    ApiResponse::new(STATUS_OK, json!({ "message": MSG_HEALTHY }))
}

fn parse_id(raw: &str) -> Option<EmployeeId> {
    raw.parse::<EmployeeId>().ok()
}

// Non-object bodies and non-string values count as missing fields.
fn candidate_from_body(body: &Value) -> EmployeeCandidate {
    let field = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_owned);
    EmployeeCandidate {
        name: field("name"),
        role: field("role"),
        department: field("department"),
        email: field("email"),
    }
}

fn log_response(op: &str, response: &ApiResponse) {
    debug!(
        "event=api_response module=api op={op} status_code={}",
        response.status
    );
}

#[cfg(test)]
mod tests {
    use super::{candidate_from_body, parse_id};
    use directory_core::EmployeeCandidate;
    use serde_json::json;

    #[test]
    fn candidate_from_body_ignores_identity_and_non_string_fields() {
        let candidate = candidate_from_body(&json!({
            "_id": "abc",
            "id": "11111111-2222-4333-8444-555555555555",
            "name": "Anna",
            "role": 7,
            "department": "Eng",
            "email": "a@b.com"
        }));

        assert_eq!(candidate.name.as_deref(), Some("Anna"));
        assert_eq!(candidate.role, None);
        assert_eq!(candidate.department.as_deref(), Some("Eng"));
        assert_eq!(candidate.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn candidate_from_non_object_body_is_empty() {
        let candidate = candidate_from_body(&json!(["Anna"]));
        assert_eq!(candidate, EmployeeCandidate::default());
    }

    #[test]
    fn parse_id_rejects_non_uuid_text() {
        assert!(parse_id("64b7f0c2e1").is_none());
        assert!(parse_id("11111111-2222-4333-8444-555555555555").is_some());
    }
}
