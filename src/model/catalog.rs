//! Ground-truth and product catalog records.
//!
//! All three are read-only from the engine's perspective: actual sales are
//! imported from an external system, products and trait configs are admin
//! maintained lookups.

/// An authoritative record of a completed transaction, imported from an
/// external source. Used only as a match target.
#[derive(Debug, Clone)]
pub struct ActualSale {
    pub id: i64,
    pub customer: String,
    pub barcode: String,
    pub qty: i64,
    pub net_amount: f64,
}

/// The composite key an actual sale is matched on. `customer` is compared
/// against the submitted sale's customer number.
#[derive(Debug, Clone, PartialEq)]
pub struct ActualSaleKey {
    pub customer: String,
    pub barcode: String,
    pub qty: i64,
    pub net_amount: f64,
}

/// Barcode to trait mapping.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: i64,
    pub barcode: String,
    pub trait_name: String,
}

/// Per-trait incentive rule. A percentage of zero or below means the trait
/// is deliberately non-incentivized.
#[derive(Debug, Clone)]
pub struct TraitConfig {
    pub id: i64,
    pub trait_name: String,
    pub percentage: f64,
    pub is_visible: bool,
}
