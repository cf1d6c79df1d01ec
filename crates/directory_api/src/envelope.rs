//! Response envelopes and error-to-status mapping.
//!
//! # Invariants
//! - Success bodies carry `success: true`; failures carry `success: false`
//!   and a `message`.
//! - Each `ServiceError` kind maps to exactly one status code.

use directory_core::ServiceError;
use log::error;
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

pub const MSG_NOT_FOUND: &str = "Employee not found";
pub const MSG_DUPLICATE_EMAIL: &str = "Email already exists";

/// Status code plus JSON body, ready to be written by any transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// `{ success: true, data, [message] }` with `data` serialized from `payload`.
    pub(crate) fn data<T: Serialize>(status: u16, message: Option<&str>, payload: &T) -> Self {
        let data = match serde_json::to_value(payload) {
            Ok(value) => value,
            Err(err) => {
                error!("event=api_encode module=api status=error error={err}");
                return Self::failure(STATUS_INTERNAL_ERROR, err.to_string());
            }
        };

        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(true));
        if let Some(message) = message {
            body.insert("message".to_string(), Value::String(message.to_string()));
        }
        body.insert("data".to_string(), data);
        Self::new(status, Value::Object(body))
    }

    pub(crate) fn failure(status: u16, message: impl Into<String>) -> Self {
        Self::new(
            status,
            json!({
                "success": false,
                "message": message.into(),
            }),
        )
    }

    pub(crate) fn not_found() -> Self {
        Self::failure(STATUS_NOT_FOUND, MSG_NOT_FOUND)
    }
}

impl From<ServiceError> for ApiResponse {
    fn from(value: ServiceError) -> Self {
        match value {
            ServiceError::Validation(problems) => {
                let message = problems
                    .iter()
                    .map(|(_, problem)| problem.as_str())
                    .collect::<Vec<_>>()
                    .join("; ");
                Self::new(
                    STATUS_BAD_REQUEST,
                    json!({
                        "success": false,
                        "message": message,
                        "errors": problems,
                    }),
                )
            }
            ServiceError::DuplicateEmail(_) => {
                Self::failure(STATUS_BAD_REQUEST, MSG_DUPLICATE_EMAIL)
            }
            ServiceError::NotFound(_) => Self::not_found(),
            ServiceError::StoreUnavailable(err) => {
                Self::failure(STATUS_INTERNAL_ERROR, err.to_string())
            }
        }
    }
}
