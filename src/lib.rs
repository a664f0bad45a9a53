//! Library Transactions
//!
//! Issued-book transaction tooling for a library management system: a
//! range-query index over transactions by issue date and domain, the data
//! sources that feed it, and a synthetic dataset generator.

use std::sync::Arc;

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use index::TransactionIndex;

/// Application state shared by the CLI commands
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
