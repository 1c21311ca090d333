//! Aggregate view records returned to the request layer.
//!
//! No core function hands a raw storage row to the caller; these are the
//! plain records that cross the boundary instead.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// Label used when a sale's salesman can no longer be resolved.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Per-salesman dashboard numbers for the calling salesman.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SalesmanStats {
    pub month_sales_count: i64,
    pub month_sales_amount: f64,
    pub today_sales_count: i64,
    pub today_sales_amount: f64,
    pub today_incentive: f64,
    pub wallet_balance: f64,
}

/// One row of the admin's all-salesmen summary.
///
/// Sale and incentive totals are windowed by the requested period;
/// `total_claimed` is always all-time because claimed-and-paid money is
/// not re-bucketed by period.
#[derive(Debug, Clone, Serialize)]
pub struct SalesmanSummary {
    pub id: i64,
    pub name: String,
    pub mobile: String,
    pub outlet: String,
    pub total_sales: f64,
    pub total_incentive: f64,
    pub total_claimed: f64,
    pub wallet_balance: f64,
}

/// One row of the admin sales listing/export.
///
/// `salesman_name` and `outlet` are `None` when the owning salesman cannot
/// be resolved; presentation surfaces render those as [`UNKNOWN_LABEL`].
#[derive(Debug, Clone, Serialize)]
pub struct AdminSaleRow {
    pub timestamp: DateTime<Utc>,
    pub customer_name: String,
    pub customer_number: String,
    pub barcode: String,
    pub qty: i64,
    pub amount: f64,
    pub salesman_name: Option<String>,
    pub outlet: Option<String>,
}

impl AdminSaleRow {
    pub fn salesman_label(&self) -> &str {
        self.salesman_name.as_deref().unwrap_or(UNKNOWN_LABEL)
    }

    pub fn outlet_label(&self) -> &str {
        self.outlet.as_deref().unwrap_or(UNKNOWN_LABEL)
    }
}

/// Filters for the admin sales listing and export.
///
/// The date range is inclusive on both ends. `search` is a case-insensitive
/// partial match OR-combined across customer name, customer number and
/// barcode. `outlet` is applied after the salesman lookup, since outlet
/// lives on the salesman, not the sale; unresolved rows never pass a
/// non-empty outlet filter.
#[derive(Debug, Clone, Default)]
pub struct SalesFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub search: Option<String>,
    pub outlet: Option<String>,
}
