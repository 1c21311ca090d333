//! Storage interfaces.
//!
//! The core never talks to a database directly; it goes through these
//! traits. One trait per table concern, implemented by `storage::sqlite`
//! for production and `storage::mock` for tests.

mod catalog_store;
mod claim_store;
mod incentive_store;
mod sale_store;
mod salesman_store;

pub use catalog_store::CatalogStore;
pub use claim_store::ClaimStore;
pub use incentive_store::IncentiveStore;
pub use sale_store::SaleStore;
pub use salesman_store::SalesmanStore;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
///
/// Missing related entities during matching (no actual-sale match, no
/// product, no trait config) are silent skip conditions, not errors, and
/// never surface here.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{entity} not found: id={id}")]
    NotFound { entity: &'static str, id: i64 },

    #[error("invalid stored timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("storage backend failure: {0}")]
    Backend(String),

    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// True when the error denotes a missing row rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}
