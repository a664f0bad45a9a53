//! Library Transactions - command-line entry point

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_transactions::{cli::Cli, config::AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::load()?;
    cli.apply(&mut config);

    // Logs go to stderr so command output stays pipeable
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_transactions={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting library-transactions v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = library_transactions::cli::execute(cli, config).await {
        let body = e.to_response();
        tracing::error!(code = body.code, "{}", body.message);
        return Err(e.into());
    }

    Ok(())
}
