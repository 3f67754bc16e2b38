//! # Warden Node
//!
//! Runs one domain and applies relay deliveries read from stdin.
//!
//! ## Startup
//!
//! 1. Load `DomainConfig` (defaults, `WD_CONFIG` file, env overrides)
//! 2. Install the fmt subscriber at the configured level
//! 3. Build the domain runtime with in-memory payment tokens
//! 4. Apply JSON-lines deliveries until EOF, then log a summary

use std::sync::Arc;

use anyhow::{Context, Result};
use shared_types::{format_address, SystemTimeSource};
use tracing::{debug, info};
use tracing_subscriber::FmtSubscriber;
use wd_02_sale_engine::InMemoryStableCoins;

use warden_runtime::{load_config, run_ingest, DomainRuntime};

#[tokio::main]
async fn main() -> Result<()> {
    let config = load_config().context("Failed to load domain configuration")?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.level()?)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!(
        "warden-node v{} starting for domain {}",
        warden_runtime::VERSION,
        config.domain_id
    );

    let payments = InMemoryStableCoins::new();
    for coin in &config.stable_coins {
        payments.register(coin.token, coin.decimals);
        debug!(
            "Registered payment token {} ({} decimals)",
            format_address(&coin.token),
            coin.decimals
        );
    }

    let runtime = DomainRuntime::new(&config, payments, Arc::new(SystemTimeSource))
        .context("Failed to build domain runtime")?;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let summary = run_ingest(stdin, &runtime).await?;

    info!(
        "Ingestion finished: {} applied, {} ignored, {} rejected, {} malformed, {} event(s)",
        summary.applied,
        summary.ignored,
        summary.rejected,
        summary.malformed,
        summary.events
    );

    Ok(())
}
