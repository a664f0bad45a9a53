//! Book catalog model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Catalog book, the source of a transaction's domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Book {
    #[validate(length(min = 1, message = "Book ID is required"))]
    pub id: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    #[validate(length(min = 1, message = "Domain is required"))]
    pub domain: String,
    #[serde(default)]
    pub isbn: String,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub available: i32,
}
