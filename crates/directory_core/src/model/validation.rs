//! Candidate validation rules.
//!
//! # Responsibility
//! - Check required fields and email format for create/update candidates.
//!
//! # Invariants
//! - Validation is pure and runs identically before create and update.
//! - Blankness is judged on trimmed text; format is judged on the raw value.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::btree_map::{BTreeMap, Iter};
use std::error::Error;
use std::fmt::{Display, Formatter};

use super::employee::EmployeeCandidate;

pub const FIELD_NAME: &str = "name";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_DEPARTMENT: &str = "department";
pub const FIELD_EMAIL: &str = "email";

// local-part @ domain, then one or more `.xx`/`.xxx` segments; ASCII word chars only.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*@[A-Za-z0-9_]+([.-]?[A-Za-z0-9_]+)*(\.[A-Za-z0-9_]{2,3})+$",
    )
    .expect("valid email regex")
});

/// Field-level problems found on a candidate, keyed by field name.
///
/// Empty means the candidate is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldProblems(BTreeMap<&'static str, String>);

impl FieldProblems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, problem: impl Into<String>) {
        self.0.insert(field, problem.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Field names with problems, in sorted order.
    pub fn fields(&self) -> Vec<&'static str> {
        self.0.keys().copied().collect()
    }

    pub fn iter(&self) -> Iter<'_, &'static str, String> {
        self.0.iter()
    }
}

impl Display for FieldProblems {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, problem) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {problem}")?;
            first = false;
        }
        Ok(())
    }
}

impl Error for FieldProblems {}

/// Checks a candidate against required-field and email-format rules.
pub fn validate_candidate(candidate: &EmployeeCandidate) -> FieldProblems {
    let mut problems = FieldProblems::new();

    if is_blank(candidate.name.as_deref()) {
        problems.insert(FIELD_NAME, "Name is required");
    }
    if is_blank(candidate.role.as_deref()) {
        problems.insert(FIELD_ROLE, "Role is required");
    }
    if is_blank(candidate.department.as_deref()) {
        problems.insert(FIELD_DEPARTMENT, "Department is required");
    }

    match candidate.email.as_deref() {
        email if is_blank(email) => problems.insert(FIELD_EMAIL, "Email is required"),
        Some(email) if !is_valid_email(email) => {
            problems.insert(FIELD_EMAIL, "Invalid email format")
        }
        _ => {}
    }

    problems
}

/// Returns whether `value` matches the accepted address pattern.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |text| text.trim().is_empty())
}
