//! Employee store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist records, assign `id`/`created_at`, and enforce email uniqueness.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Uniqueness is checked by the `employees_email_unique` index, never by a
//!   separate lookup, so two concurrent writers cannot both claim an email.
//! - Every mutation is a single statement (`RETURNING`), so replace/delete
//!   observe and change the same row atomically.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::employee::{Employee, EmployeeCandidate, EmployeeFields, EmployeeId};
use crate::model::validation::validate_candidate;
use crate::search::filter::EmployeeFilter;
use rusqlite::{params, Connection, ErrorCode, Params, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

const EMPLOYEE_COLUMNS: &str = "id, name, role, department, email, created_at";
const REQUIRED_COLUMNS: [&str; 7] = [
    "seq",
    "id",
    "name",
    "role",
    "department",
    "email",
    "created_at",
];
const EMAIL_UNIQUE_TARGET: &str = "employees.email";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error for employee persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    /// Another record already holds this email.
    DuplicateEmail(String),
    NotFound(EmployeeId),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEmail(email) => write!(f, "email already exists: {email}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted employee data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage contract for the employee collection.
pub trait EmployeeRepository {
    /// Inserts a new record, assigning its id and creation timestamp.
    fn insert_employee(&self, fields: &EmployeeFields) -> RepoResult<Employee>;
    /// Replaces all business fields of an existing record.
    fn replace_employee(&self, id: EmployeeId, fields: &EmployeeFields) -> RepoResult<Employee>;
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Lists matching records, most recently created first.
    fn list_employees(&self, filter: &EmployeeFilter) -> RepoResult<Vec<Employee>>;
    /// Removes a record and returns its last state.
    fn delete_employee(&self, id: EmployeeId) -> RepoResult<Employee>;
}

/// SQLite-backed employee store.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Wraps a connection after checking it carries the expected schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` on schema drift.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    fn query_one<P: Params>(&self, sql: &str, params: P) -> RepoResult<Option<Employee>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_employee_row(row)?)),
            None => Ok(None),
        }
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn insert_employee(&self, fields: &EmployeeFields) -> RepoResult<Employee> {
        let id = EmployeeId::generate();
        let inserted = self
            .query_one(
                &format!(
                    "INSERT INTO employees (id, name, role, department, email, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     RETURNING {EMPLOYEE_COLUMNS};"
                ),
                params![
                    id.to_string(),
                    fields.name.as_str(),
                    fields.role.as_str(),
                    fields.department.as_str(),
                    fields.email.as_str(),
                    now_epoch_ms(),
                ],
            )
            .map_err(|err| classify_write_error(err, &fields.email))?;

        inserted.ok_or_else(|| RepoError::InvalidData("insert returned no row".to_string()))
    }

    fn replace_employee(&self, id: EmployeeId, fields: &EmployeeFields) -> RepoResult<Employee> {
        let replaced = self
            .query_one(
                &format!(
                    "UPDATE employees
                     SET name = ?2, role = ?3, department = ?4, email = ?5
                     WHERE id = ?1
                     RETURNING {EMPLOYEE_COLUMNS};"
                ),
                params![
                    id.to_string(),
                    fields.name.as_str(),
                    fields.role.as_str(),
                    fields.department.as_str(),
                    fields.email.as_str(),
                ],
            )
            .map_err(|err| classify_write_error(err, &fields.email))?;

        replaced.ok_or(RepoError::NotFound(id))
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.query_one(
            &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1;"),
            [id.to_string()],
        )
    }

    fn list_employees(&self, filter: &EmployeeFilter) -> RepoResult<Vec<Employee>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {EMPLOYEE_COLUMNS}
             FROM employees
             ORDER BY created_at DESC, seq DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();

        while let Some(row) = rows.next()? {
            let employee = parse_employee_row(row)?;
            if filter.matches(&employee) {
                employees.push(employee);
            }
        }

        Ok(employees)
    }

    fn delete_employee(&self, id: EmployeeId) -> RepoResult<Employee> {
        self.query_one(
            &format!("DELETE FROM employees WHERE id = ?1 RETURNING {EMPLOYEE_COLUMNS};"),
            [id.to_string()],
        )?
        .ok_or(RepoError::NotFound(id))
    }
}

fn classify_write_error(err: RepoError, email: &str) -> RepoError {
    match err {
        RepoError::Db(DbError::Sqlite(ref sqlite_err)) if is_email_conflict(sqlite_err) => {
            RepoError::DuplicateEmail(email.to_string())
        }
        other => other,
    }
}

fn is_email_conflict(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(failure, message) => {
            failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && message
                    .as_deref()
                    .is_some_and(|text| text.contains(EMAIL_UNIQUE_TARGET))
        }
        _ => false,
    }
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let id_text: String = row.get("id")?;
    let id = id_text.parse::<EmployeeId>().map_err(|_| {
        RepoError::InvalidData(format!("invalid id value `{id_text}` in employees.id"))
    })?;

    let employee = Employee {
        id,
        name: row.get("name")?,
        role: row.get("role")?,
        department: row.get("department")?,
        email: row.get("email")?,
        created_at: row.get("created_at")?,
    };

    let problems = validate_candidate(&EmployeeCandidate::from(employee.fields()));
    if !problems.is_empty() {
        return Err(RepoError::InvalidData(format!(
            "employee {id} violates field rules: {problems}"
        )));
    }

    Ok(employee)
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let present = table_columns(conn, "employees")?;
    if present.is_empty() {
        return Err(RepoError::MissingRequiredTable("employees"));
    }
    if let Some(column) = REQUIRED_COLUMNS
        .into_iter()
        .find(|column| !present.iter().any(|name| name == column))
    {
        return Err(RepoError::MissingRequiredColumn {
            table: "employees",
            column,
        });
    }

    Ok(())
}

// Empty when the table does not exist.
fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}
