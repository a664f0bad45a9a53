//! Range index scenarios over hand-built and generated data

use library_transactions::config::DatasetConfig;
use library_transactions::services::dataset::DatasetGenerator;
use library_transactions::services::fines::FinePolicy;
use library_transactions::TransactionIndex;

use crate::common::{date, ids, tx};

fn three_records() -> TransactionIndex {
    TransactionIndex::new(vec![
        tx("t1", Some(date(2025, 1, 5)), "DBMS"),
        tx("t2", Some(date(2025, 1, 10)), "Algorithms"),
        tx("t3", Some(date(2025, 1, 15)), "DBMS"),
    ])
}

#[test]
fn test_three_record_walkthrough() {
    let index = three_records();
    assert_eq!(ids(&index.query(date(2025, 1, 1), date(2025, 1, 31), None)), vec!["t1", "t2", "t3"]);
    assert_eq!(ids(&index.query(date(2025, 1, 6), date(2025, 1, 31), None)), vec!["t2", "t3"]);
    assert_eq!(
        ids(&index.query(date(2025, 1, 1), date(2025, 1, 31), Some("dbms"))),
        vec!["t1", "t3"]
    );
    assert!(index.query(date(2025, 2, 1), date(2025, 2, 28), None).is_empty());
}

#[test]
fn test_boundaries_are_inclusive() {
    let index = TransactionIndex::new(vec![
        tx("before", Some(date(2025, 3, 9)), "DBMS"),
        tx("first", Some(date(2025, 3, 10)), "DBMS"),
        tx("middle", Some(date(2025, 3, 15)), "DBMS"),
        tx("last", Some(date(2025, 3, 20)), "DBMS"),
        tx("after", Some(date(2025, 3, 21)), "DBMS"),
    ]);
    assert_eq!(
        ids(&index.query(date(2025, 3, 10), date(2025, 3, 20), None)),
        vec!["first", "middle", "last"]
    );
    assert_eq!(ids(&index.query(date(2025, 3, 15), date(2025, 3, 15), None)), vec!["middle"]);
}

#[test]
fn test_reversed_range_matches_nothing() {
    let index = three_records();
    assert!(index.query(date(2025, 1, 31), date(2025, 1, 1), None).is_empty());
}

#[test]
fn test_domain_filter_ignores_case_both_ways() {
    let index = TransactionIndex::new(vec![
        tx("a", Some(date(2025, 1, 5)), "Data Structures"),
        tx("b", Some(date(2025, 1, 6)), "data structures"),
        tx("c", Some(date(2025, 1, 7)), "Algorithms"),
    ]);
    assert_eq!(
        ids(&index.query(date(2025, 1, 1), date(2025, 1, 31), Some("DATA STRUCTURES"))),
        vec!["a", "b"]
    );
    assert!(index.query(date(2025, 1, 1), date(2025, 1, 31), Some("Networks")).is_empty());
}

#[test]
fn test_generated_dataset_queries() {
    let config = DatasetConfig {
        size: 1500,
        seed: 2024,
        ..DatasetConfig::default()
    };
    let dataset = DatasetGenerator::new(&config, FinePolicy::default(), date(2025, 11, 1))
        .unwrap()
        .generate();
    let transactions = dataset.transactions();
    let index = TransactionIndex::new(transactions.clone());

    assert_eq!(index.indexed_len(), 1500);
    assert_eq!(index.domains().count(), 5);
    let span = index.date_span().unwrap();
    assert!(span.start >= config.start_date && span.end <= config.end_date);

    let (from, to) = (date(2025, 3, 1), date(2025, 3, 31));
    let hits = index.query(from, to, Some("Algorithms"));
    let expected = transactions
        .iter()
        .filter(|t| t.matches_domain("algorithms"))
        .filter(|t| t.issue_date.map_or(false, |d| from <= d && d <= to))
        .count();
    assert_eq!(hits.len(), expected);
    assert!(hits.windows(2).all(|w| w[0].issue_date <= w[1].issue_date));

    // A one-week window touches a small fraction of the tree.
    let tree = index.tree().unwrap();
    let mut positions = Vec::new();
    let visited = tree.collect(date(2025, 6, 1), date(2025, 6, 7), &mut positions);
    assert!(!positions.is_empty());
    assert!(visited < tree.len() / 10, "visited {} of {}", visited, tree.len());
}
