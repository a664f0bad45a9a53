//! JSON file source: a directory holding exports of the backend listings

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use super::{distinct_domains, TransactionSource};
use crate::{
    error::{AppError, AppResult},
    models::{Book, IssuedBook},
    services::dataset::Dataset,
};

pub const BOOKS_FILE: &str = "books.json";
pub const ISSUED_BOOKS_FILE: &str = "issued_books.json";
pub const DOMAINS_FILE: &str = "domains.json";
pub const USERS_FILE: &str = "users.json";

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read<T: DeserializeOwned>(&self, name: &str) -> AppResult<T> {
        let path = self.dir.join(name);
        let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                AppError::NotFound(format!("{} does not exist", path.display()))
            }
            _ => AppError::Io(e),
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        tokio::fs::write(self.dir.join(name), bytes).await?;
        Ok(())
    }

    /// Write every part of `dataset` into the source directory, creating it
    /// if needed.
    pub async fn save(&self, dataset: &Dataset) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        self.write(DOMAINS_FILE, &dataset.domains).await?;
        self.write(USERS_FILE, &dataset.users).await?;
        self.write(BOOKS_FILE, &dataset.books).await?;
        self.write(ISSUED_BOOKS_FILE, &dataset.issued_books).await?;

        tracing::info!(
            dir = %self.dir.display(),
            books = dataset.books.len(),
            issued_books = dataset.issued_books.len(),
            "Saved dataset"
        );
        Ok(())
    }
}

#[async_trait]
impl TransactionSource for JsonFileSource {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.read(BOOKS_FILE).await
    }

    async fn list_issued_books(&self) -> AppResult<Vec<IssuedBook>> {
        self.read(ISSUED_BOOKS_FILE).await
    }

    async fn list_domains(&self) -> AppResult<Vec<String>> {
        match self.read::<Vec<String>>(DOMAINS_FILE).await {
            Ok(domains) => Ok(domains),
            Err(AppError::NotFound(_)) => Ok(distinct_domains(&self.list_books().await?)),
            Err(e) => Err(e),
        }
    }
}
