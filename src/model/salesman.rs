//! Salesman records.

use serde::Serialize;

/// A registered salesman.
///
/// `wallet_balance` is an accumulator: the accrual batch credits it and
/// claim settlement debits it. It is treated as authoritative runtime
/// state, so re-running the engine must never double-credit it (the
/// incentive dedup key guarantees this, not a recomputation).
#[derive(Debug, Clone, Serialize)]
pub struct Salesman {
    pub id: i64,
    pub name: String,
    pub mobile: String,
    pub outlet: String,
    pub vertical: String,
    pub is_approved: bool,
    pub wallet_balance: f64,
}
