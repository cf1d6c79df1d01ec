//! Case-insensitive substring filter over name and department.
//!
//! # Invariants
//! - Absent or empty query components impose no constraint.
//! - Present components are combined with logical AND.
//! - Both sides are folded with `str::to_lowercase`; query text is not trimmed.

use crate::model::employee::Employee;

/// Optional (name-substring, department-substring) pair narrowing a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub name: Option<String>,
    pub department: Option<String>,
}

impl EmployeeFilter {
    pub fn new(name: Option<String>, department: Option<String>) -> Self {
        Self { name, department }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            department: None,
        }
    }

    pub fn by_department(department: impl Into<String>) -> Self {
        Self {
            name: None,
            department: Some(department.into()),
        }
    }

    /// Returns `true` when no component constrains the result.
    pub fn is_empty(&self) -> bool {
        active(self.name.as_deref()).is_none() && active(self.department.as_deref()).is_none()
    }

    /// Returns whether `employee` satisfies every non-empty component.
    pub fn matches(&self, employee: &Employee) -> bool {
        contains_folded(&employee.name, self.name.as_deref())
            && contains_folded(&employee.department, self.department.as_deref())
    }
}

/// Applies `filter` to an already fetched list, keeping input order.
pub fn filter_employees(employees: &[Employee], filter: &EmployeeFilter) -> Vec<Employee> {
    employees
        .iter()
        .filter(|employee| filter.matches(employee))
        .cloned()
        .collect()
}

fn active(component: Option<&str>) -> Option<&str> {
    component.filter(|value| !value.is_empty())
}

fn contains_folded(haystack: &str, needle: Option<&str>) -> bool {
    match active(needle) {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}
