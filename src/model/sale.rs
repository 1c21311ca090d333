//! Sale records.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A salesman-submitted transaction. Immutable once stored.
#[derive(Debug, Clone, Serialize)]
pub struct Sale {
    pub id: i64,
    pub salesman_id: i64,
    pub customer_name: String,
    pub customer_number: String,
    pub barcode: String,
    pub qty: i64,
    pub amount: f64,
    pub net_amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// A sale submission before it has been assigned an id and timestamp.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub customer_name: String,
    pub customer_number: String,
    pub barcode: String,
    pub qty: i64,
    pub amount: f64,
    pub net_amount: f64,
}
