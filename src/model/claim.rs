//! Claim records.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle of a wallet cash-out request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Paid,
    Rejected,
}

impl ClaimStatus {
    /// Statuses counted as settled money in summaries.
    pub const SETTLED: [ClaimStatus; 2] = [ClaimStatus::Approved, ClaimStatus::Paid];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Paid => "paid",
            ClaimStatus::Rejected => "rejected",
        }
    }
}

/// A salesman's request to cash out earned incentive.
#[derive(Debug, Clone, Serialize)]
pub struct Claim {
    pub id: i64,
    pub salesman_id: i64,
    pub amount: f64,
    pub status: ClaimStatus,
    pub timestamp: DateTime<Utc>,
}
