//! Business logic services

pub mod dataset;
pub mod fines;
pub mod stats;
pub mod transactions;

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{config::AppConfig, error::AppResult, repository::TransactionSource};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub transactions: transactions::TransactionsService,
    pub fines: fines::FinePolicy,
}

impl Services {
    /// Create all services reading from the given source
    pub fn new(source: Arc<dyn TransactionSource>, config: &AppConfig) -> Self {
        Self {
            transactions: transactions::TransactionsService::new(source),
            fines: fines::FinePolicy::from_config(&config.fines),
        }
    }

    /// Same services, reading transactions from another source
    pub fn with_source(&self, source: Arc<dyn TransactionSource>) -> Self {
        Self {
            transactions: transactions::TransactionsService::new(source),
            fines: self.fines,
        }
    }

    /// Generator for a synthetic dataset shaped by `config.dataset`
    pub fn dataset_generator(
        &self,
        config: &AppConfig,
        today: NaiveDate,
    ) -> AppResult<dataset::DatasetGenerator> {
        dataset::DatasetGenerator::new(&config.dataset, self.fines, today)
    }
}
