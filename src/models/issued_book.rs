//! Issued book listing rows, as returned by the backend's issued-books endpoint

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};
use validator::{Validate, ValidationError};

use super::dates::IsoDate;
use super::transaction::TransactionStatus;

/// Issued book row joined with its user and book
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IssuedBook {
    #[validate(length(min = 1, message = "Issued book ID is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "User ID is required"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "Book ID is required"))]
    pub book_id: String,
    pub book_title: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[serde_as(as = "DefaultOnError<Option<IsoDate>>")]
    #[serde(default)]
    pub issue_date: Option<NaiveDate>,
    #[serde_as(as = "IsoDate")]
    pub due_date: NaiveDate,
    #[serde_as(as = "DefaultOnError<Option<IsoDate>>")]
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(custom(function = "validate_fine"))]
    pub fine_amount: Decimal,
    pub status: TransactionStatus,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

fn validate_fine(fine: &Decimal) -> Result<(), ValidationError> {
    if *fine < Decimal::ZERO {
        let mut error = ValidationError::new("negative_fine");
        error.message = Some("Fine amount cannot be negative".into());
        return Err(error);
    }
    Ok(())
}
