//! Transaction index service: loading, rebuilding and querying

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    index::{IndexSummary, TransactionIndex},
    models::{dates::parse_iso_date, Book, Transaction},
    repository::TransactionSource,
    services::stats::TransactionStats,
};

/// Domain selector value meaning "no domain filter"
pub const ALL_DOMAINS: &str = "all";

/// A validated date range query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub domain: Option<String>,
}

impl RangeQuery {
    /// Build a query, rejecting ranges whose `from` is after `to`.
    ///
    /// An empty domain or [`ALL_DOMAINS`] (any case) means no domain filter.
    pub fn new(from: NaiveDate, to: NaiveDate, domain: Option<String>) -> AppResult<Self> {
        if from > to {
            return Err(AppError::Validation(format!(
                "From date {} cannot be after to date {}",
                from, to
            )));
        }
        let domain = domain
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty() && !d.eq_ignore_ascii_case(ALL_DOMAINS));
        Ok(Self { from, to, domain })
    }

    /// Build a query from raw date strings (`YYYY-MM-DD`)
    pub fn parse(from: &str, to: &str, domain: Option<&str>) -> AppResult<Self> {
        let from = parse_iso_date(from)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid from date: {}", from)))?;
        let to = parse_iso_date(to)
            .ok_or_else(|| AppError::BadRequest(format!("Invalid to date: {}", to)))?;
        Self::new(from, to, domain.map(str::to_string))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    pub transactions: Vec<Transaction>,
    pub stats: TransactionStats,
    pub elapsed_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReloadReport {
    pub index: IndexSummary,
    /// Issued rows dropped because they failed validation
    pub rejected: usize,
}

#[derive(Clone)]
pub struct TransactionsService {
    source: Arc<dyn TransactionSource>,
    current: Arc<RwLock<Arc<TransactionIndex>>>,
}

impl TransactionsService {
    pub fn new(source: Arc<dyn TransactionSource>) -> Self {
        Self {
            source,
            current: Arc::new(RwLock::new(Arc::new(TransactionIndex::default()))),
        }
    }

    /// Fetch the catalog and issued-book listing, rebuild the index and
    /// swap it in. Issued rows failing validation are skipped.
    pub async fn reload(&self) -> AppResult<ReloadReport> {
        let books = self.source.list_books().await?;
        let issued_books = self.source.list_issued_books().await?;
        let mut rejected = 0;

        // Invalid books still supply the domain of their issued rows.
        let catalog: IndexMap<String, Book> = books
            .into_iter()
            .inspect(|book| {
                if let Err(e) = book.validate() {
                    tracing::warn!(book_id = %book.id, error = %e, "Catalog book fails validation");
                }
            })
            .map(|book| (book.id.clone(), book))
            .collect();

        let mut transactions = Vec::with_capacity(issued_books.len());
        for issued in issued_books {
            if let Err(e) = issued.validate() {
                tracing::warn!(id = %issued.id, error = %e, "Skipping invalid issued book");
                rejected += 1;
                continue;
            }
            let book = catalog.get(&issued.book_id);
            if book.is_none() {
                tracing::debug!(id = %issued.id, book_id = %issued.book_id, "Issued book not in catalog");
            }
            transactions.push(Transaction::from_issued(issued, book));
        }

        let index = self.replace(transactions);
        Ok(ReloadReport { index, rejected })
    }

    /// Build an index over `transactions` and make it current
    pub fn replace(&self, transactions: Vec<Transaction>) -> IndexSummary {
        let index = Arc::new(TransactionIndex::new(transactions));
        let summary = index.summary();
        *self.current.write() = index;
        summary
    }

    /// The index currently in use; stays valid across later rebuilds
    pub fn snapshot(&self) -> Arc<TransactionIndex> {
        self.current.read().clone()
    }

    pub fn query(&self, query: &RangeQuery) -> QueryResult {
        let index = self.snapshot();
        let started = Instant::now();
        let hits = index.query(query.from, query.to, query.domain.as_deref());
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        let stats = TransactionStats::from_transactions(hits.iter().copied());
        tracing::info!(
            from = %query.from,
            to = %query.to,
            domain = query.domain.as_deref().unwrap_or(ALL_DOMAINS),
            matched = hits.len(),
            elapsed_ms,
            "Filtered transactions"
        );

        QueryResult {
            transactions: hits.into_iter().cloned().collect(),
            stats,
            elapsed_ms,
        }
    }

    pub fn by_domain(&self, domain: &str) -> Vec<Transaction> {
        self.snapshot().by_domain(domain).into_iter().cloned().collect()
    }

    pub async fn domains(&self) -> AppResult<Vec<String>> {
        self.source.list_domains().await
    }
}
