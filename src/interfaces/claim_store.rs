//! Claim aggregation interface.
//!
//! Claims are created and settled outside this core; the reporting engine
//! only ever sums them.

use async_trait::async_trait;

use crate::interfaces::Result;

#[async_trait]
pub trait ClaimStore: Send + Sync {
    /// All-time sum of one salesman's approved and paid claims. Claim
    /// totals are never windowed by period.
    async fn sum_settled(&self, salesman_id: i64) -> Result<f64>;
}
