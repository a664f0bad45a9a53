//! Shared fixtures

use chrono::{Days, NaiveDate};
use library_transactions::models::{Transaction, TransactionStatus};
use rust_decimal::Decimal;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Day `n` counted from 2025-01-01
pub fn day(n: u64) -> NaiveDate {
    date(2025, 1, 1) + Days::new(n)
}

pub fn tx(id: &str, issue_date: Option<NaiveDate>, domain: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        user_id: "user-001".to_string(),
        book_id: "book-001".to_string(),
        book_title: "Database System Concepts".to_string(),
        author: Some("Silberschatz, Korth".to_string()),
        user_name: Some("Rahul Sharma".to_string()),
        quantity: 1,
        issue_date,
        due_date: issue_date.unwrap_or_else(|| date(2025, 1, 1)) + Days::new(14),
        return_date: None,
        domain: domain.to_string(),
        status: TransactionStatus::Issued,
        fine_amount: Decimal::ZERO,
    }
}

pub fn ids(result: &[&Transaction]) -> Vec<String> {
    result.iter().map(|tx| tx.id.clone()).collect()
}
