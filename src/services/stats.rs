//! Statistics over transaction sets (typically a range query result)

use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusCounts {
    pub issued: usize,
    pub returned: usize,
    pub overdue: usize,
}

impl StatusCounts {
    pub fn get(&self, status: TransactionStatus) -> usize {
        match status {
            TransactionStatus::Issued => self.issued,
            TransactionStatus::Returned => self.returned,
            TransactionStatus::Overdue => self.overdue,
        }
    }

    fn bump(&mut self, status: TransactionStatus) {
        match status {
            TransactionStatus::Issued => self.issued += 1,
            TransactionStatus::Returned => self.returned += 1,
            TransactionStatus::Overdue => self.overdue += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionStats {
    pub total: usize,
    pub total_quantity: u64,
    pub outstanding: usize,
    pub by_status: StatusCounts,
    pub total_fines: Decimal,
    pub first_issue_date: Option<NaiveDate>,
    pub last_issue_date: Option<NaiveDate>,
    /// Count per lower-cased domain, in order of first appearance
    pub by_domain: IndexMap<String, usize>,
}

impl TransactionStats {
    pub fn from_transactions<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut stats = Self::default();
        for tx in transactions {
            stats.total += 1;
            stats.total_quantity += u64::from(tx.quantity);
            if tx.is_outstanding() {
                stats.outstanding += 1;
            }
            stats.by_status.bump(tx.status);
            stats.total_fines += tx.fine_amount;
            *stats.by_domain.entry(tx.domain_key()).or_insert(0) += 1;

            if let Some(issued) = tx.issue_date {
                stats.first_issue_date = Some(stats.first_issue_date.map_or(issued, |d| d.min(issued)));
                stats.last_issue_date = Some(stats.last_issue_date.map_or(issued, |d| d.max(issued)));
            }
        }
        stats
    }
}
