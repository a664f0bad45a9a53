//! Transaction data sources.
//!
//! The index consumes a flat, already-loaded list of records. Sources are
//! where that list comes from: a JSON export of the backend listing, or an
//! in-memory dataset.

pub mod json;
pub mod memory;

use async_trait::async_trait;
use indexmap::IndexSet;

use crate::{
    error::AppResult,
    models::{Book, IssuedBook},
};

pub use json::JsonFileSource;
pub use memory::MemorySource;

/// Read access to the book catalog and the issued-book listing
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionSource: Send + Sync {
    async fn list_books(&self) -> AppResult<Vec<Book>>;

    async fn list_issued_books(&self) -> AppResult<Vec<IssuedBook>>;

    /// Distinct domain labels in catalog order
    async fn list_domains(&self) -> AppResult<Vec<String>> {
        let books = self.list_books().await?;
        Ok(distinct_domains(&books))
    }
}

pub(crate) fn distinct_domains(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .map(|b| b.domain.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}
