//! Overdue fines and status derivation

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{config::FinesConfig, models::TransactionStatus};

/// Flat per-day fine for books kept past their due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinePolicy {
    daily_rate: Decimal,
}

impl FinePolicy {
    pub fn new(daily_rate: Decimal) -> Self {
        Self { daily_rate }
    }

    pub fn from_config(config: &FinesConfig) -> Self {
        Self::new(config.daily_rate)
    }

    /// Whole days between `due_date` and the return date (or `today` while
    /// the book is still out). Zero when not late.
    pub fn days_late(due_date: NaiveDate, return_date: Option<NaiveDate>, today: NaiveDate) -> i64 {
        let until = return_date.unwrap_or(today);
        (until - due_date).num_days().max(0)
    }

    pub fn fine(&self, due_date: NaiveDate, return_date: Option<NaiveDate>, today: NaiveDate) -> Decimal {
        self.daily_rate * Decimal::from(Self::days_late(due_date, return_date, today))
    }

    pub fn status(due_date: NaiveDate, return_date: Option<NaiveDate>, today: NaiveDate) -> TransactionStatus {
        match return_date {
            Some(_) => TransactionStatus::Returned,
            None if today > due_date => TransactionStatus::Overdue,
            None => TransactionStatus::Issued,
        }
    }
}

impl Default for FinePolicy {
    fn default() -> Self {
        Self::from_config(&FinesConfig::default())
    }
}
