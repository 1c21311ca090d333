//! Storage implementations.

use std::sync::Arc;

use crate::interfaces::{CatalogStore, ClaimStore, IncentiveStore, SaleStore, SalesmanStore};

pub mod mock;

#[cfg(feature = "sqlite")]
pub mod schema;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use mock::MockLedger;

#[cfg(feature = "sqlite")]
pub use sqlite::{
    SqliteCatalogStore, SqliteClaimStore, SqliteIncentiveStore, SqliteSaleStore,
    SqliteSalesmanStore,
};

/// The full set of store handles the services are built from.
#[derive(Clone)]
pub struct Stores {
    pub salesmen: Arc<dyn SalesmanStore>,
    pub sales: Arc<dyn SaleStore>,
    pub catalog: Arc<dyn CatalogStore>,
    pub incentives: Arc<dyn IncentiveStore>,
    pub claims: Arc<dyn ClaimStore>,
}

/// Initialize storage based on configuration.
#[cfg(feature = "sqlite")]
pub async fn init_storage(
    config: &crate::config::StorageConfig,
) -> Result<Stores, Box<dyn std::error::Error>> {
    use tracing::{error, info};

    info!("Storage: {} at {}", config.storage_type, config.path);

    match config.storage_type.as_str() {
        "sqlite" => {
            if let Some(parent) = std::path::Path::new(&config.path).parent() {
                std::fs::create_dir_all(parent)?;
            }

            let pool =
                sqlx::SqlitePool::connect(&format!("sqlite:{}?mode=rwc", config.path)).await?;
            sqlite::init_schema(&pool).await?;

            Ok(Stores {
                salesmen: Arc::new(SqliteSalesmanStore::new(pool.clone())),
                sales: Arc::new(SqliteSaleStore::new(pool.clone())),
                catalog: Arc::new(SqliteCatalogStore::new(pool.clone())),
                incentives: Arc::new(SqliteIncentiveStore::new(pool.clone())),
                claims: Arc::new(SqliteClaimStore::new(pool)),
            })
        }
        other => {
            error!("Unknown storage type: {}", other);
            Err(format!("Unknown storage type: {}", other).into())
        }
    }
}
