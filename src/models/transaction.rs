//! Transaction model: one book-issue event, denormalized for indexing

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

use super::book::Book;
use super::dates::IsoDate;
use super::issued_book::IssuedBook;
use crate::error::AppError;

/// Domain label used when an issued book no longer exists in the catalog
pub const UNKNOWN_DOMAIN: &str = "Unknown";

/// Lifecycle status of an issued book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Issued,
    Returned,
    Overdue,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Issued => "issued",
            TransactionStatus::Returned => "returned",
            TransactionStatus::Overdue => "overdue",
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "issued" => Ok(TransactionStatus::Issued),
            "returned" => Ok(TransactionStatus::Returned),
            "overdue" => Ok(TransactionStatus::Overdue),
            other => Err(AppError::BadRequest(format!(
                "Invalid transaction status: {}",
                other
            ))),
        }
    }
}

/// A transaction record as consumed by [`crate::index::TransactionIndex`].
///
/// Records are immutable once ingested. `issue_date` is optional because
/// upstream data may carry an unparseable date; such records are kept in
/// the domain index but never show up in range queries.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub book_title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    pub quantity: u32,
    #[serde_as(as = "DefaultOnError<Option<IsoDate>>")]
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde_as(as = "IsoDate")]
    pub due_date: NaiveDate,
    #[serde_as(as = "DefaultOnError<Option<IsoDate>>")]
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    pub domain: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub fine_amount: Decimal,
}

impl Transaction {
    /// Build a transaction from a backend listing row, taking the domain
    /// from the matching catalog book.
    pub fn from_issued(issued: IssuedBook, book: Option<&Book>) -> Self {
        let domain = book
            .map(|b| b.domain.clone())
            .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string());
        let author = issued.author.or_else(|| book.map(|b| b.author.clone()));

        Self {
            id: issued.id,
            user_id: issued.user_id,
            book_id: issued.book_id,
            book_title: issued.book_title,
            author,
            user_name: issued.user_name,
            quantity: issued.quantity,
            issue_date: issued.issue_date,
            due_date: issued.due_date,
            return_date: issued.return_date,
            domain,
            status: issued.status,
            fine_amount: issued.fine_amount,
        }
    }

    /// Lower-cased domain, the key used by the domain index
    pub fn domain_key(&self) -> String {
        self.domain.to_lowercase()
    }

    pub fn matches_domain(&self, domain: &str) -> bool {
        self.domain.to_lowercase() == domain.to_lowercase()
    }

    pub fn is_outstanding(&self) -> bool {
        self.return_date.is_none()
    }
}
