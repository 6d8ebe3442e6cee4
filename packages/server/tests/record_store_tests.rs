//! Postgres integration tests for the record store.
//!
//! Tests share one database, so each uses a course suffix unique to the test.
//! Run with: cargo test -- --ignored

mod common;

use axum::http::StatusCode;
use records_core::common::{PageRequest, RecordId, SortDirection, SortField, SortOrder};
use records_core::domains::records::models::{Record, RecordFilter};
use records_core::domains::records::validation::ValidRecord;
use test_context::test_context;

use common::{create_test_record, record_body, seed_search_records, TestHarness};

fn valid(name: &str, course: &str, age: i32) -> ValidRecord {
    ValidRecord {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        course: course.to_string(),
        age,
    }
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn create_find_update_delete_round_trip(ctx: &TestHarness) {
    let pool = &ctx.db_pool;

    let mut record = Record::create(&valid("Dana", "Store-Crud", 19), pool)
        .await
        .expect("Failed to create record");
    assert_eq!(record.name, "Dana");

    let found = Record::find_by_id(record.id, pool).await.unwrap();
    assert_eq!(found.as_ref(), Some(&record));

    record.apply(valid("Dana Updated", "Store-Crud-2", 40));
    let updated = record.update(pool).await.unwrap().expect("row exists");
    assert_eq!(updated, record);

    assert!(Record::delete(record.id, pool).await.unwrap());
    assert!(!Record::delete(record.id, pool).await.unwrap());
    assert_eq!(Record::find_by_id(record.id, pool).await.unwrap(), None);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn update_of_missing_row_returns_none(ctx: &TestHarness) {
    let record = Record::from_valid(RecordId::from_i64(i64::MAX), valid("Ghost", "None", 20));

    let result = record.update(&ctx.db_pool).await.unwrap();

    assert_eq!(result, None);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn schema_rejects_underage_rows(ctx: &TestHarness) {
    let result = Record::create(&valid("Kid", "Store-Check", 12), &ctx.db_pool).await;

    assert!(result.is_err());
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn find_page_applies_each_strategy(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    for (name, course) in [
        ("Alice", "Math-StorePage"),
        ("Alicia", "Physics-StorePage"),
        ("Bob", "Math-StorePage"),
    ] {
        Record::create(&valid(name, course, 20), pool).await.unwrap();
    }
    let request = PageRequest::default();

    let names = |records: Vec<Record>| records.into_iter().map(|r| r.name).collect::<Vec<_>>();

    let filter = RecordFilter::from_params(Some("ali"), Some("math-storepage"));
    let (records, total) = Record::find_page(&filter, &request, pool).await.unwrap();
    assert_eq!(names(records), vec!["Alice"]);
    assert_eq!(total, 1);

    let filter = RecordFilter::from_params(None, Some("math-storepage"));
    let (records, total) = Record::find_page(&filter, &request, pool).await.unwrap();
    assert_eq!(names(records), vec!["Alice", "Bob"]);
    assert_eq!(total, 2);

    let filter = RecordFilter::from_params(Some("   "), Some("storepage"));
    let request = PageRequest::new(0, 2, SortOrder::new(SortField::Name, SortDirection::Desc));
    let (records, total) = Record::find_page(&filter, &request, pool).await.unwrap();
    assert_eq!(names(records), vec!["Bob", "Alicia"]);
    assert_eq!(total, 3);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn like_wildcards_in_filter_are_literal(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    Record::create(&valid("Percent", "100%-StoreLike", 20), pool)
        .await
        .unwrap();
    Record::create(&valid("Plain", "1000-StoreLike", 20), pool)
        .await
        .unwrap();

    let filter = RecordFilter::from_params(None, Some("100%"));
    let (records, _) = Record::find_page(&filter, &PageRequest::default(), pool)
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Percent");
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn http_search_over_postgres(ctx: &TestHarness) {
    let client = ctx.api();
    seed_search_records(&client, "-HttpSearch").await;

    let response = client.get("/records?name=ali&course=math-httpsearch").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.names(), vec!["Alice"]);

    let response = client.get("/records?course=httpsearch").await;
    assert_eq!(response.names(), vec!["Alice", "Alicia", "Bob"]);
}

#[test_context(TestHarness)]
#[tokio::test]
#[ignore] // Requires Docker
async fn http_crud_over_postgres(ctx: &TestHarness) {
    let client = ctx.api();
    let id = create_test_record(&client, "Erin", "Chemistry-HttpCrud").await;

    let response = client
        .put(
            &format!("/records/{}", id),
            record_body("Erin", "erin@example.org", "Biology-HttpCrud", 22),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["course"], "Biology-HttpCrud");

    let response = client.delete(&format!("/records/{}", id)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = client.get(&format!("/records/{}", id)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = client.delete(&format!("/records/{}", id)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}
