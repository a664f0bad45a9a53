//! Transaction range index.
//!
//! [`TransactionIndex`] is built once from a full transaction set and then
//! answers repeated "issued between `from` and `to`, optionally within a
//! domain" queries without rescanning the set. It owns two independent
//! structures:
//!
//! - a [`RangeTree`] over the records that carry an issue date, sorted
//!   ascending by that date (stable, so equal dates keep input order);
//! - a [`DomainIndex`] over every record, dated or not.
//!
//! The index has no mutation API. A changed transaction set means building
//! a new index and swapping it in (see
//! [`crate::services::transactions::TransactionsService`]).

pub mod domain;
pub mod tree;

use std::time::Instant;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::Transaction;

pub use domain::DomainIndex;
pub use tree::{DateRange, NodeId, RangeNode, RangeTree};

/// How many undated record ids to name in the construction warning
const UNDATED_LOG_SAMPLE: usize = 5;

/// Shape of a built index, for logging and reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    pub total: usize,
    pub indexed: usize,
    pub undated: usize,
    pub domains: usize,
    pub tree_nodes: usize,
    pub tree_height: usize,
    pub date_span: Option<DateRange>,
}

#[derive(Debug, Clone, Default)]
pub struct TransactionIndex {
    /// Records in input order
    records: Vec<Transaction>,
    /// Record positions of dated records, sorted by issue date
    sorted: Vec<usize>,
    tree: Option<RangeTree>,
    domains: DomainIndex,
}

impl TransactionIndex {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        let started = Instant::now();

        let domains = DomainIndex::build(transactions.iter().map(|tx| tx.domain.as_str()));

        let mut sorted: Vec<usize> = transactions
            .iter()
            .enumerate()
            .filter(|(_, tx)| tx.issue_date.is_some())
            .map(|(position, _)| position)
            .collect();
        // `sort_by_key` is stable: equal dates keep their input order.
        sorted.sort_by_key(|&position| transactions[position].issue_date);

        let dates: Vec<NaiveDate> = sorted
            .iter()
            .filter_map(|&position| transactions[position].issue_date)
            .collect();
        let tree = RangeTree::build(&dates);

        let undated = transactions.len() - sorted.len();
        if undated > 0 {
            let sample: Vec<&str> = transactions
                .iter()
                .filter(|tx| tx.issue_date.is_none())
                .take(UNDATED_LOG_SAMPLE)
                .map(|tx| tx.id.as_str())
                .collect();
            tracing::warn!(
                undated,
                ?sample,
                "Transactions without a valid issue date are excluded from range queries"
            );
        }

        let index = Self {
            records: transactions,
            sorted,
            tree,
            domains,
        };

        tracing::info!(
            transactions = index.records.len(),
            indexed = index.sorted.len(),
            domains = index.domains.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Built transaction range index"
        );

        index
    }

    /// Transactions issued within `[from, to]` (both inclusive), in
    /// ascending issue-date order.
    ///
    /// When `domain` is given and non-empty, the date-range result is
    /// further restricted to records whose domain matches it
    /// case-insensitively. A reversed range (`from > to`) matches nothing.
    pub fn query(&self, from: NaiveDate, to: NaiveDate, domain: Option<&str>) -> Vec<&Transaction> {
        let Some(tree) = &self.tree else {
            return Vec::new();
        };

        let started = Instant::now();
        let mut positions = Vec::new();
        let visited = tree.collect(from, to, &mut positions);

        let mut result: Vec<&Transaction> = positions
            .into_iter()
            .map(|position| &self.records[self.sorted[position]])
            .collect();

        if let Some(domain) = domain.filter(|d| !d.is_empty()) {
            let wanted = domain.to_lowercase();
            result.retain(|tx| tx.domain.to_lowercase() == wanted);
        }

        tracing::debug!(
            %from,
            %to,
            domain = domain.unwrap_or(""),
            visited,
            matched = result.len(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "Range query"
        );

        result
    }

    /// Every transaction of `domain` (case-insensitive), in input order,
    /// including records without an issue date.
    pub fn by_domain(&self, domain: &str) -> Vec<&Transaction> {
        self.domains
            .get(domain)
            .iter()
            .map(|&position| &self.records[position])
            .collect()
    }

    /// Lower-cased domain names in first-seen order
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.domains()
    }

    pub fn domain_index(&self) -> &DomainIndex {
        &self.domains
    }

    pub fn tree(&self) -> Option<&RangeTree> {
        self.tree.as_ref()
    }

    /// Records covered by a tree node, in ascending issue-date order
    pub fn node_transactions(&self, node: &RangeNode) -> Vec<&Transaction> {
        self.sorted[node.span.clone()]
            .iter()
            .map(|&position| &self.records[position])
            .collect()
    }

    /// All ingested records in input order
    pub fn transactions(&self) -> &[Transaction] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records reachable by range queries
    pub fn indexed_len(&self) -> usize {
        self.sorted.len()
    }

    /// Earliest and latest issue date in the index
    pub fn date_span(&self) -> Option<DateRange> {
        self.tree.as_ref().map(|tree| tree.root().range)
    }

    pub fn summary(&self) -> IndexSummary {
        IndexSummary {
            total: self.records.len(),
            indexed: self.sorted.len(),
            undated: self.records.len() - self.sorted.len(),
            domains: self.domains.len(),
            tree_nodes: self.tree.as_ref().map_or(0, RangeTree::len),
            tree_height: self.tree.as_ref().map_or(0, RangeTree::height),
            date_span: self.date_span(),
        }
    }
}
