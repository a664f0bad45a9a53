//! Property-based tests for range index invariants

use std::collections::HashSet;

use proptest::prelude::*;

use library_transactions::models::Transaction;
use library_transactions::TransactionIndex;

use crate::common::{day, ids, tx};

const DOMAINS: &[&str] = &["DBMS", "dbms", "Algorithms", "Operating Systems", "Data Structures"];

/// Transactions over a 60-day window, roughly one in eight without issue date.
fn arb_transactions() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec(
        (prop::option::weighted(0.875, 0u64..60), 0..DOMAINS.len()),
        0..120,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (offset, domain))| tx(&format!("t{}", i), offset.map(day), DOMAINS[domain]))
            .collect()
    })
}

fn arb_domain() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["dbms", "DBMS", "algorithms", "Data Structures", "Networks"])
        .prop_map(String::from)
}

/// Linear-scan reference: dated records in `[from, to]`, stably sorted by date.
fn oracle(transactions: &[Transaction], from: u64, to: u64, domain: Option<&str>) -> Vec<String> {
    let (from, to) = (day(from), day(to));
    let mut hits: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.issue_date.map_or(false, |d| from <= d && d <= to))
        .filter(|t| domain.map_or(true, |d| t.matches_domain(d)))
        .collect();
    hits.sort_by_key(|t| t.issue_date);
    ids(&hits)
}

proptest! {
    #[test]
    fn full_span_returns_every_dated_record(transactions in arb_transactions()) {
        let index = TransactionIndex::new(transactions.clone());
        let result = ids(&index.query(day(0), day(59), None));

        let unique: HashSet<_> = result.iter().collect();
        prop_assert_eq!(unique.len(), result.len());

        let expected: HashSet<_> = transactions
            .iter()
            .filter(|t| t.issue_date.is_some())
            .map(|t| t.id.clone())
            .collect();
        prop_assert_eq!(result.iter().cloned().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn range_query_matches_linear_scan(
        transactions in arb_transactions(),
        a in 0u64..70,
        b in 0u64..70,
    ) {
        let (from, to) = (a.min(b), a.max(b));
        let index = TransactionIndex::new(transactions.clone());
        prop_assert_eq!(
            ids(&index.query(day(from), day(to), None)),
            oracle(&transactions, from, to, None)
        );
    }

    #[test]
    fn domain_query_is_filtered_subset(
        transactions in arb_transactions(),
        a in 0u64..70,
        b in 0u64..70,
        domain in arb_domain(),
    ) {
        let (from, to) = (day(a.min(b)), day(a.max(b)));
        let index = TransactionIndex::new(transactions.clone());

        let all = index.query(from, to, None);
        let filtered = index.query(from, to, Some(domain.as_str()));

        for t in &filtered {
            prop_assert!(t.domain.to_lowercase() == domain.to_lowercase());
            prop_assert!(all.iter().any(|x| x.id == t.id));
        }
        prop_assert_eq!(
            ids(&filtered),
            oracle(&transactions, a.min(b), a.max(b), Some(domain.as_str()))
        );
    }

    #[test]
    fn empty_index_returns_nothing(a in 0u64..400, b in 0u64..400) {
        let index = TransactionIndex::new(Vec::new());
        prop_assert!(index.query(day(a), day(b), None).is_empty());
        prop_assert!(index.query(day(a), day(b), Some("dbms")).is_empty());
    }

    #[test]
    fn undated_records_never_returned(transactions in arb_transactions(), a in 0u64..70, b in 0u64..70) {
        let index = TransactionIndex::new(transactions.clone());
        let undated: HashSet<_> = transactions
            .iter()
            .filter(|t| t.issue_date.is_none())
            .map(|t| t.id.as_str())
            .collect();
        for t in index.query(day(a.min(b)), day(a.max(b)), None) {
            prop_assert!(!undated.contains(t.id.as_str()));
        }
    }

    #[test]
    fn repeated_queries_are_identical(transactions in arb_transactions(), a in 0u64..70, b in 0u64..70) {
        let index = TransactionIndex::new(transactions);
        let (from, to) = (day(a.min(b)), day(a.max(b)));
        let first = ids(&index.query(from, to, None));
        let second = ids(&index.query(from, to, None));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn domain_index_holds_every_record(transactions in arb_transactions()) {
        let index = TransactionIndex::new(transactions.clone());
        let total: usize = index.domains().map(|d| index.by_domain(d).len()).sum();
        prop_assert_eq!(total, transactions.len());
        for t in &transactions {
            prop_assert!(index.by_domain(&t.domain).iter().any(|x| x.id == t.id));
        }
    }
}
