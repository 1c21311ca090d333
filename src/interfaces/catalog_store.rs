//! Ground-truth and catalog lookup interface.

use async_trait::async_trait;

use crate::interfaces::Result;
use crate::model::{ActualSale, ActualSaleKey, Product, TraitConfig};

/// Read-only lookups used by the matching pass.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Point lookup of an imported actual sale by its full composite key.
    async fn find_actual_sale(&self, key: &ActualSaleKey) -> Result<Option<ActualSale>>;

    /// Product by barcode.
    async fn product_by_barcode(&self, barcode: &str) -> Result<Option<Product>>;

    /// Incentive rule for a trait.
    async fn trait_config(&self, trait_name: &str) -> Result<Option<TraitConfig>>;
}
