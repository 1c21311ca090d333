//! spiff-accrue: one-shot incentive accrual run.
//!
//! Loads configuration, opens the store, rescans the full sale table and
//! credits every newly matched incentive. Safe to re-run on a schedule;
//! already-credited matches are counted as skips, not errors.

use tracing::info;

use spiff::config::Config;
use spiff::services::AccrualEngine;
use spiff::storage::init_storage;
use spiff::utils::bootstrap::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::load(None)?;
    let stores = init_storage(&config.storage).await?;

    let engine = AccrualEngine::new(stores.sales, stores.catalog, stores.incentives);
    let report = engine.generate().await?;

    info!(
        created = report.created,
        skipped_duplicates = report.skipped_duplicates,
        "accrual run finished"
    );
    println!("{}", serde_json::to_string(&report)?);
    Ok(())
}
