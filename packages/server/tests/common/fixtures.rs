//! Test fixtures for creating test data.

use serde_json::{json, Value};

use super::ApiClient;

/// JSON body for a valid record.
pub fn record_body(name: &str, email: &str, course: &str, age: i32) -> Value {
    json!({
        "name": name,
        "email": email,
        "course": course,
        "age": age,
    })
}

/// Create a record through the API and return its id.
pub async fn create_test_record(client: &ApiClient, name: &str, course: &str) -> i64 {
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
    let response = client
        .post("/records", record_body(name, &email, course, 21))
        .await;
    assert_eq!(response.status, 201, "create failed: {}", response.text);
    response.json()["id"].as_i64().expect("created record has id")
}

/// Seed the three-record search fixture:
/// ("Alice", "Math"), ("Alicia", "Physics"), ("Bob", "Math").
pub async fn seed_search_records(client: &ApiClient, course_suffix: &str) {
    create_test_record(client, "Alice", &format!("Math{}", course_suffix)).await;
    create_test_record(client, "Alicia", &format!("Physics{}", course_suffix)).await;
    create_test_record(client, "Bob", &format!("Math{}", course_suffix)).await;
}
