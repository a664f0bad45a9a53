//! In-memory transaction source

use async_trait::async_trait;

use super::TransactionSource;
use crate::{
    error::AppResult,
    models::{Book, IssuedBook},
    services::dataset::Dataset,
};

#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    books: Vec<Book>,
    issued_books: Vec<IssuedBook>,
}

impl MemorySource {
    pub fn new(books: Vec<Book>, issued_books: Vec<IssuedBook>) -> Self {
        Self { books, issued_books }
    }
}

impl From<Dataset> for MemorySource {
    fn from(dataset: Dataset) -> Self {
        Self::new(dataset.books, dataset.issued_books)
    }
}

#[async_trait]
impl TransactionSource for MemorySource {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.books.clone())
    }

    async fn list_issued_books(&self) -> AppResult<Vec<IssuedBook>> {
        Ok(self.issued_books.clone())
    }
}
