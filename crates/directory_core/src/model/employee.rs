//! Employee domain model.
//!
//! # Responsibility
//! - Define the stored record, the caller candidate and the validated field set.
//!
//! # Invariants
//! - `EmployeeId` is a v4 UUID and is never reused after deletion.
//! - `EmployeeFields` only exists for candidates that passed validation.
//! - Business field values are stored exactly as supplied (no trimming).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

use super::validation::{validate_candidate, FieldProblems};

/// Stable identifier assigned to a record on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(Uuid);

impl EmployeeId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Display for EmployeeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Returned when a textual id cannot name any record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEmployeeId(pub String);

impl Display for InvalidEmployeeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid employee id `{}`", self.0)
    }
}

impl Error for InvalidEmployeeId {}

impl FromStr for EmployeeId {
    type Err = InvalidEmployeeId;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| InvalidEmployeeId(value.to_string()))
    }
}

/// Canonical personnel record as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub role: String,
    pub department: String,
    /// Globally unique, exact (case-sensitive) match.
    pub email: String,
    /// Unix epoch milliseconds, assigned by the store.
    pub created_at: i64,
}

impl Employee {
    /// Returns the four business fields of this record.
    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            name: self.name.clone(),
            role: self.role.clone(),
            department: self.department.clone(),
            email: self.email.clone(),
        }
    }
}

/// Caller-supplied values proposed for create/update.
///
/// Missing body fields deserialize to `None`. Identity fields such as `id`
/// or `createdAt` are not part of this shape and are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmployeeCandidate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub email: Option<String>,
}

impl EmployeeCandidate {
    /// Builds a candidate with all four fields present.
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        department: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            role: Some(role.into()),
            department: Some(department.into()),
            email: Some(email.into()),
        }
    }

    /// Validates this candidate and converts it into storable fields.
    ///
    /// # Errors
    /// - Returns every field problem found when the candidate is invalid.
    pub fn into_fields(self) -> Result<EmployeeFields, FieldProblems> {
        let problems = validate_candidate(&self);
        if !problems.is_empty() {
            return Err(problems);
        }

        Ok(EmployeeFields {
            name: self.name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
            department: self.department.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        })
    }
}

/// Validated business fields ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeFields {
    pub name: String,
    pub role: String,
    pub department: String,
    pub email: String,
}

impl From<EmployeeFields> for EmployeeCandidate {
    fn from(value: EmployeeFields) -> Self {
        Self::new(value.name, value.role, value.department, value.email)
    }
}
