use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;
use std::sync::Arc;

use price_scout::api::DuckDuckGoClient;
use price_scout::core::{logging, Config};
use price_scout::scanner::{ExclusionSet, FallbackPriceModel, MarketScanner};

/// Estimate a fair market price for a product from retail search results.
#[derive(Debug, Parser)]
#[command(name = "price-scout", version)]
struct Args {
    /// Product description, e.g. "handwoven pashmina shawl"
    query: String,

    /// Keyword whose results must not influence the price (repeatable)
    #[arg(short, long = "exclude", value_name = "KEYWORD")]
    exclude: Vec<String>,

    /// Number of sites searched at once
    #[arg(long)]
    concurrency: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env().context("invalid configuration")?;
    if let Some(concurrency) = args.concurrency {
        config.scanner.concurrency = concurrency;
    }

    logging::init_logging(&config.monitoring.log_level);

    tracing::info!("🚀 Price scout v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Trusted sites: {}", config.scanner.trusted_sites.join(", "));

    let provider = DuckDuckGoClient::new(&config.provider).context("failed to build search client")?;
    let scanner = MarketScanner::new(Arc::new(provider), config.scanner.clone())
        .context("invalid scanner configuration")?;

    let exclusions = ExclusionSet::new(&args.exclude);
    let output = match scanner.scan(&args.query, &exclusions).await {
        Some(stats) => json!({ "status": "market", "stats": stats }),
        None => {
            let estimate = FallbackPriceModel::default().estimate(&args.query);
            tracing::info!("Using category fallback price ₹{}", estimate);
            json!({ "status": "fallback", "estimate": estimate })
        }
    };

    tracing::debug!("Scan metrics: {:?}", scanner.metrics().snapshot());

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
