//! Service tests against JSON file and in-memory sources

use std::sync::Arc;

use serde_json::json;

use library_transactions::config::{AppConfig, DatasetConfig};
use library_transactions::repository::{JsonFileSource, MemorySource, TransactionSource};
use library_transactions::services::dataset::{DatasetGenerator, SAMPLE_DOMAINS};
use library_transactions::services::fines::FinePolicy;
use library_transactions::services::transactions::RangeQuery;
use library_transactions::services::Services;
use library_transactions::AppError;

use crate::common::{date, tx};

fn small_dataset() -> library_transactions::services::dataset::Dataset {
    let config = DatasetConfig {
        size: 300,
        seed: 11,
        ..DatasetConfig::default()
    };
    DatasetGenerator::new(&config, FinePolicy::default(), date(2025, 11, 1))
        .unwrap()
        .generate()
}

#[tokio::test]
async fn test_saved_dataset_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let source = JsonFileSource::new(dir.path());
    let dataset = small_dataset();
    source.save(&dataset).await.unwrap();

    assert_eq!(source.list_domains().await.unwrap(), SAMPLE_DOMAINS);

    let services = Services::new(Arc::new(source), &AppConfig::default());
    let report = services.transactions.reload().await.unwrap();
    assert_eq!(report.rejected, 0);
    assert_eq!(report.index.total, 300);
    assert_eq!(report.index.indexed, 300);

    let query = RangeQuery::parse("2024-10-01", "2025-10-31", Some("all")).unwrap();
    let result = services.transactions.query(&query);
    assert_eq!(result.transactions.len(), 300);
    assert_eq!(result.stats.total, 300);
    assert_eq!(
        result.stats.by_status.issued + result.stats.by_status.returned + result.stats.by_status.overdue,
        300
    );
}

#[tokio::test]
async fn test_undated_rows_stay_visible_by_domain() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("books.json"),
        serde_json::to_vec(&json!([
            {"id": "book-001", "title": "Database System Concepts", "author": "Silberschatz, Korth",
             "domain": "DBMS", "isbn": "978-0073523323", "quantity": 5, "available": 3}
        ]))
        .unwrap(),
    )
    .unwrap();
    std::fs::write(
        dir.path().join("issued_books.json"),
        serde_json::to_vec(&json!([
            {"id": "issued-1", "user_id": "user-001", "book_id": "book-001",
             "book_title": "Database System Concepts", "quantity": 1,
             "issue_date": "2025-01-05", "due_date": "2025-01-19", "status": "returned",
             "return_date": "2025-01-18", "fine_amount": 0},
            {"id": "issued-2", "user_id": "user-002", "book_id": "book-001",
             "book_title": "Database System Concepts", "quantity": 1,
             "issue_date": "0000-garbage", "due_date": "2025-01-25", "status": "overdue",
             "fine_amount": "300.00"}
        ]))
        .unwrap(),
    )
    .unwrap();

    let services = Services::new(Arc::new(JsonFileSource::new(dir.path())), &AppConfig::default());
    let report = services.transactions.reload().await.unwrap();
    assert_eq!(report.index.total, 2);
    assert_eq!(report.index.undated, 1);

    let query = RangeQuery::new(date(1970, 1, 1), date(2999, 12, 31), None).unwrap();
    let result = services.transactions.query(&query);
    assert_eq!(result.transactions.len(), 1);
    assert_eq!(result.transactions[0].id, "issued-1");

    let dbms = services.transactions.by_domain("dbms");
    assert_eq!(dbms.len(), 2);
}

#[test]
fn test_rebuild_swaps_index() {
    let services = Services::new(
        Arc::new(MemorySource::from(small_dataset())),
        &AppConfig::default(),
    );
    let report = tokio_test::block_on(services.transactions.reload()).unwrap();
    assert_eq!(report.index.total, 300);

    let old = services.transactions.snapshot();
    services.transactions.replace(vec![
        tx("n1", Some(date(2025, 1, 5)), "DBMS"),
        tx("n2", Some(date(2025, 1, 6)), "DBMS"),
    ]);

    assert_eq!(old.len(), 300);
    assert_eq!(services.transactions.snapshot().len(), 2);
    let query = RangeQuery::new(date(2025, 1, 1), date(2025, 1, 31), Some("dbms".into())).unwrap();
    assert_eq!(services.transactions.query(&query).transactions.len(), 2);
}

#[test]
fn test_concurrent_readers_share_snapshot() {
    let services = Services::new(
        Arc::new(MemorySource::from(small_dataset())),
        &AppConfig::default(),
    );
    tokio_test::block_on(services.transactions.reload()).unwrap();
    let index = services.transactions.snapshot();
    let expected = index.query(date(2025, 1, 1), date(2025, 6, 30), None).len();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = Arc::clone(&index);
            std::thread::spawn(move || index.query(date(2025, 1, 1), date(2025, 6, 30), None).len())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_reversed_query_is_rejected() {
    let err = RangeQuery::parse("2025-02-01", "2025-01-01", None).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_missing_data_dir_fails_reload() {
    let dir = tempfile::tempdir().unwrap();
    let services = Services::new(
        Arc::new(JsonFileSource::new(dir.path().join("missing"))),
        &AppConfig::default(),
    );
    assert!(matches!(services.transactions.reload().await, Err(AppError::NotFound(_))));
}
