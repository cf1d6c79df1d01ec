use directory_core::db::open_db;
use directory_core::{
    EmployeeCandidate, EmployeeFilter, EmployeeService, ServiceError, SqliteEmployeeRepository,
};
use std::path::PathBuf;
use std::sync::{Arc, Barrier};
use std::thread;

const WRITERS: usize = 8;

fn create_with_own_connection(path: PathBuf, barrier: Arc<Barrier>, name: String) -> Result<(), String> {
    let conn = open_db(&path).map_err(|err| err.to_string())?;
    let service = EmployeeService::new(
        SqliteEmployeeRepository::try_new(&conn).map_err(|err| err.to_string())?,
    );
    barrier.wait();
    match service.create_employee(EmployeeCandidate::new(name, "Engineer", "Eng", "shared@example.com")) {
        Ok(_) => Ok(()),
        Err(ServiceError::DuplicateEmail(_)) => Err("duplicate".to_string()),
        Err(other) => Err(other.to_string()),
    }
}

#[test]
fn concurrent_creates_with_same_email_admit_exactly_one() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("directory.db");
    drop(open_db(&path).unwrap());

    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = (0..WRITERS)
        .map(|index| {
            let path = path.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || create_with_own_connection(path, barrier, format!("Writer {index}")))
        })
        .collect();

    let outcomes: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let successes = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
    let duplicates = outcomes
        .iter()
        .filter(|outcome| matches!(outcome, Err(message) if message == "duplicate"))
        .count();
    assert_eq!(successes, 1, "outcomes: {outcomes:?}");
    assert_eq!(duplicates, WRITERS - 1, "outcomes: {outcomes:?}");

    let conn = open_db(&path).unwrap();
    let service = EmployeeService::new(SqliteEmployeeRepository::try_new(&conn).unwrap());
    assert_eq!(
        service
            .list_employees(&EmployeeFilter::default())
            .unwrap()
            .len(),
        1
    );
}
