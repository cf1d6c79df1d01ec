use directory_api::{health, DirectoryApi};
use serde_json::{json, Value};
use tempfile::TempDir;

fn api() -> (TempDir, DirectoryApi) {
    let dir = tempfile::tempdir().unwrap();
    let api = DirectoryApi::new(dir.path().join("directory.db"));
    (dir, api)
}

fn body(name: &str, department: &str, email: &str) -> Value {
    json!({
        "name": name,
        "role": "Engineer",
        "department": department,
        "email": email,
    })
}

fn created_id(api: &DirectoryApi, name: &str, department: &str, email: &str) -> String {
    let response = api.create(&body(name, department, email));
    assert_eq!(response.status, 201, "{:?}", response.body);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

#[test]
fn create_returns_201_with_assigned_identity() {
    let (_dir, api) = api();

    let response = api.create(&body("Anna", "Eng", "a@b.com"));
    assert_eq!(response.status, 201);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["message"], "Employee created successfully");
    assert_eq!(response.body["data"]["name"], "Anna");
    assert!(response.body["data"]["id"].is_string());
    assert!(response.body["data"]["createdAt"].is_i64());
}

#[test]
fn create_ignores_caller_supplied_identity() {
    let (_dir, api) = api();

    let mut request = body("Anna", "Eng", "a@b.com");
    request["id"] = json!("11111111-2222-4333-8444-555555555555");
    request["createdAt"] = json!(1);

    let response = api.create(&request);
    assert_eq!(response.status, 201);
    assert_ne!(
        response.body["data"]["id"],
        "11111111-2222-4333-8444-555555555555"
    );
    assert_ne!(response.body["data"]["createdAt"], 1);
}

#[test]
fn invalid_and_duplicate_creates_are_400() {
    let (_dir, api) = api();

    let missing = api.create(&json!({ "name": "Anna" }));
    assert_eq!(missing.status, 400);
    assert_eq!(missing.body["success"], false);
    assert_eq!(missing.body["errors"]["email"], "Email is required");
    assert!(missing.body["errors"].get("name").is_none());

    let malformed = api.create(&body("Anna", "Eng", "not-an-email"));
    assert_eq!(malformed.status, 400);
    assert_eq!(malformed.body["message"], "Invalid email format");

    created_id(&api, "Anna", "Eng", "a@b.com");
    let duplicate = api.create(&body("Bob", "Sales", "a@b.com"));
    assert_eq!(duplicate.status, 400);
    assert_eq!(duplicate.body["message"], "Email already exists");
}

#[test]
fn list_returns_count_and_newest_first() {
    let (_dir, api) = api();

    let first = created_id(&api, "Anna", "Eng", "anna@example.com");
    let second = created_id(&api, "Bob", "Annex", "bob@example.com");

    let all = api.list(None, None);
    assert_eq!(all.status, 200);
    assert_eq!(all.body["success"], true);
    assert_eq!(all.body["count"], 2);
    assert_eq!(all.body["data"][0]["id"], second);
    assert_eq!(all.body["data"][1]["id"], first);

    let by_name = api.list(Some("ann"), None);
    assert_eq!(by_name.body["count"], 1);
    assert_eq!(by_name.body["data"][0]["id"], first);

    let empty_params = api.list(Some(""), Some(""));
    assert_eq!(empty_params.body["count"], 2);

    let none = api.list(Some("anna"), Some("annex"));
    assert_eq!(none.body["count"], 0);
    assert_eq!(none.body["data"], json!([]));
}

#[test]
fn get_update_delete_roundtrip() {
    let (_dir, api) = api();
    let id = created_id(&api, "Anna", "Eng", "a@b.com");

    let fetched = api.get(&id);
    assert_eq!(fetched.status, 200);
    assert_eq!(fetched.body["data"]["email"], "a@b.com");

    let updated = api.update(&id, &body("Anna Lee", "Eng", "a@b.com"));
    assert_eq!(updated.status, 200);
    assert_eq!(updated.body["message"], "Employee updated successfully");
    assert_eq!(updated.body["data"]["name"], "Anna Lee");
    assert_eq!(
        updated.body["data"]["createdAt"],
        fetched.body["data"]["createdAt"]
    );

    let deleted = api.delete(&id);
    assert_eq!(deleted.status, 200);
    assert_eq!(deleted.body["success"], true);
    assert_eq!(deleted.body["message"], "Employee deleted successfully");
    assert_eq!(deleted.body["data"]["name"], "Anna Lee");

    for response in [
        api.get(&id),
        api.update(&id, &body("Anna", "Eng", "a@b.com")),
        api.delete(&id),
    ] {
        assert_eq!(response.status, 404);
        assert_eq!(response.body["message"], "Employee not found");
    }
}

#[test]
fn update_to_taken_email_is_400_and_invalid_update_is_400() {
    let (_dir, api) = api();
    let anna = created_id(&api, "Anna", "Eng", "anna@example.com");
    created_id(&api, "Bob", "Sales", "bob@example.com");

    let duplicate = api.update(&anna, &body("Anna", "Eng", "bob@example.com"));
    assert_eq!(duplicate.status, 400);
    assert_eq!(duplicate.body["message"], "Email already exists");

    let invalid = api.update(&anna, &json!({}));
    assert_eq!(invalid.status, 400);
    assert_eq!(invalid.body["errors"].as_object().unwrap().len(), 4);
}

#[test]
fn malformed_ids_are_404() {
    let (_dir, api) = api();

    assert_eq!(api.get("64b7f0c2e1").status, 404);
    assert_eq!(api.delete("").status, 404);
    assert_eq!(
        api.update("nope", &body("Anna", "Eng", "a@b.com")).status,
        404
    );
}

#[test]
fn unusable_store_is_500() {
    let dir = tempfile::tempdir().unwrap();
    let api = DirectoryApi::new(dir.path().join("missing").join("directory.db"));

    let response = api.list(None, None);
    assert_eq!(response.status, 500);
    assert_eq!(response.body["success"], false);
    assert!(response.body["message"].is_string());
}

#[test]
fn health_reports_running() {
    let response = health();
    assert_eq!(response.status, 200);
    assert_eq!(response.body["message"], "Server is running");
}
