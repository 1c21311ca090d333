//! Incentive records and accrual batch types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A credited incentive. At most one row exists per
/// (salesman_id, barcode, trait_name) triple; that key is enforced by a
/// storage-level unique constraint and a conflicting insert is the
/// idempotent skip case, not an error.
#[derive(Debug, Clone, Serialize)]
pub struct Incentive {
    pub id: i64,
    pub salesman_id: i64,
    pub barcode: String,
    pub trait_name: String,
    pub amount: f64,
    pub is_visible: bool,
    pub timestamp: DateTime<Utc>,
}

/// A candidate incentive produced by the matching pass, not yet persisted.
#[derive(Debug, Clone)]
pub struct Accrual {
    pub salesman_id: i64,
    pub barcode: String,
    pub trait_name: String,
    pub amount: f64,
    pub is_visible: bool,
    pub timestamp: DateTime<Utc>,
}

/// Outcome of one accrual batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccrualReport {
    /// Incentives created and credited in this run.
    pub created: u64,
    /// Candidates dropped because the dedup key already existed.
    pub skipped_duplicates: u64,
}

/// An incentive joined to its salesman's display name, for admin listings.
#[derive(Debug, Clone, Serialize)]
pub struct IncentiveView {
    pub id: i64,
    pub barcode: String,
    pub trait_name: String,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    pub is_visible: bool,
    pub salesman_name: String,
}
