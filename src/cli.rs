//! Command-line interface.
//!
//! - `library-transactions generate` - write a synthetic dataset as JSON
//! - `library-transactions query` - filter transactions by issue date range and domain
//! - `library-transactions stats` - summarize the index and the full transaction set

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use crate::{
    config::AppConfig,
    error::AppResult,
    models::{dates::parse_iso_date, Transaction},
    repository::{JsonFileSource, MemorySource, TransactionSource},
    services::{
        stats::TransactionStats,
        transactions::{QueryResult, RangeQuery},
        Services,
    },
    AppState,
};

#[derive(Debug, Parser)]
#[command(name = "library-transactions")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding books.json and issued_books.json.
    #[arg(long, global = true, env = "LIBTX_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Fold command-line overrides into the loaded configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.data_dir {
            config.dataset.data_dir = dir.clone();
        }
        if let Commands::Generate(args) = &self.command {
            if let Some(out) = &args.out {
                config.dataset.data_dir = out.clone();
            }
            if let Some(size) = args.size {
                config.dataset.size = size;
            }
            if let Some(seed) = args.seed {
                config.dataset.seed = seed;
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a synthetic dataset and write it as JSON.
    Generate(GenerateArgs),
    /// Query transactions issued within a date range.
    Query(QueryArgs),
    /// Summarize the transaction set.
    Stats(StatsArgs),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Output directory (defaults to the configured data directory).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Number of transactions to generate.
    #[arg(long)]
    pub size: Option<usize>,
    /// Random seed.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Reference date for fines and statuses (defaults to today).
    #[arg(long, value_parser = parse_date)]
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// First issue date, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub from: String,
    /// Last issue date, inclusive (YYYY-MM-DD).
    #[arg(long)]
    pub to: String,
    /// Restrict to one domain (case-insensitive); "all" for every domain.
    #[arg(long)]
    pub domain: Option<String>,
    /// Query a freshly generated in-memory dataset instead of the data directory.
    #[arg(long)]
    pub synthetic: bool,
}

#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Summarize a freshly generated in-memory dataset instead of the data directory.
    #[arg(long)]
    pub synthetic: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_iso_date(raw).ok_or_else(|| format!("invalid date `{}`, expected YYYY-MM-DD", raw))
}

/// Run the parsed command
pub async fn execute(cli: Cli, config: AppConfig) -> AppResult<()> {
    let format = cli.format;
    match cli.command {
        Commands::Generate(args) => generate(args, config).await,
        Commands::Query(args) => query(args, config, format).await,
        Commands::Stats(args) => stats(args, config, format).await,
    }
}

fn build_state(config: AppConfig, source: Arc<dyn TransactionSource>) -> AppState {
    let services = Services::new(source, &config);
    AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    }
}

async fn load_state(config: AppConfig, synthetic: bool) -> AppResult<AppState> {
    let mut state = build_state(
        config.clone(),
        Arc::new(JsonFileSource::new(config.dataset.data_dir)),
    );
    if synthetic {
        let dataset = state
            .services
            .dataset_generator(&state.config, Local::now().date_naive())?
            .generate();
        let services = state.services.with_source(Arc::new(MemorySource::from(dataset)));
        state.services = Arc::new(services);
    }

    let report = state.services.transactions.reload().await?;
    if report.rejected > 0 {
        tracing::warn!(rejected = report.rejected, "Some source rows were rejected");
    }
    Ok(state)
}

async fn generate(args: GenerateArgs, config: AppConfig) -> AppResult<()> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let source = JsonFileSource::new(config.dataset.data_dir.clone());
    let state = build_state(config, Arc::new(source.clone()));

    let dataset = state
        .services
        .dataset_generator(&state.config, today)?
        .generate();
    source.save(&dataset).await?;

    println!(
        "Wrote {} transactions over {} books to {}",
        dataset.issued_books.len(),
        dataset.books.len(),
        source.dir().display()
    );
    Ok(())
}

async fn query(args: QueryArgs, config: AppConfig, format: OutputFormat) -> AppResult<()> {
    let range = RangeQuery::parse(&args.from, &args.to, args.domain.as_deref())?;
    let state = load_state(config, args.synthetic).await?;
    let result = state.services.transactions.query(&range);

    match format {
        OutputFormat::Json => print_json(&result)?,
        OutputFormat::Text => print_query(&range, &result),
    }
    Ok(())
}

#[derive(Serialize)]
struct StatsReport {
    index: crate::index::IndexSummary,
    transactions: TransactionStats,
    domains: Vec<String>,
}

async fn stats(args: StatsArgs, config: AppConfig, format: OutputFormat) -> AppResult<()> {
    let state = load_state(config, args.synthetic).await?;
    let index = state.services.transactions.snapshot();
    let report = StatsReport {
        index: index.summary(),
        transactions: TransactionStats::from_transactions(index.transactions()),
        domains: state.services.transactions.domains().await?,
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Text => print_stats(&report),
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn format_row(tx: &Transaction) -> String {
    let date = |d: Option<NaiveDate>| d.map_or_else(|| "-".to_string(), |d| d.to_string());
    format!(
        "{:<14} {:<10} {:<10} {:<8} {:<18} {:>3} {:>8}  {}",
        tx.id,
        date(tx.issue_date),
        date(tx.return_date),
        tx.status,
        tx.domain,
        tx.quantity,
        tx.fine_amount.to_string(),
        tx.book_title
    )
}

fn print_query(range: &RangeQuery, result: &QueryResult) {
    println!(
        "{} transactions issued {} to {} ({}) in {:.2}ms",
        result.transactions.len(),
        range.from,
        range.to,
        range.domain.as_deref().unwrap_or("all domains"),
        result.elapsed_ms
    );
    if result.transactions.is_empty() {
        return;
    }
    println!(
        "{:<14} {:<10} {:<10} {:<8} {:<18} {:>3} {:>8}  {}",
        "ID", "ISSUED", "RETURNED", "STATUS", "DOMAIN", "QTY", "FINE", "TITLE"
    );
    for tx in &result.transactions {
        println!("{}", format_row(tx));
    }
    println!(
        "issued: {}  returned: {}  overdue: {}  fines: {}",
        result.stats.by_status.issued,
        result.stats.by_status.returned,
        result.stats.by_status.overdue,
        result.stats.total_fines
    );
}

fn print_stats(report: &StatsReport) {
    let index = &report.index;
    println!("Transactions: {} ({} indexed, {} without issue date)", index.total, index.indexed, index.undated);
    if let Some(span) = index.date_span {
        println!("Issue dates:  {} to {}", span.start, span.end);
    }
    println!("Tree:         {} nodes, height {}", index.tree_nodes, index.tree_height);
    println!("Domains:      {}", report.domains.join(", "));
    for (domain, count) in &report.transactions.by_domain {
        println!("  {:<20} {}", domain, count);
    }
    let by_status = &report.transactions.by_status;
    println!(
        "Status:       {} issued, {} returned, {} overdue",
        by_status.issued, by_status.returned, by_status.overdue
    );
    println!("Fines:        {}", report.transactions.total_fines);
}
