//! Sale persistence interface.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::interfaces::Result;
use crate::model::{AdminSaleRow, NewSale, Sale, SalesFilter};
use crate::utils::time::TimeWindow;

#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Persist a submitted sale for its owning salesman.
    async fn submit(&self, sale: NewSale, salesman_id: i64) -> Result<Sale>;

    /// All sales submitted by one salesman, newest first.
    async fn by_salesman(&self, salesman_id: i64) -> Result<Vec<Sale>>;

    /// Full table scan in primary-key order. The accrual engine rescans
    /// everything each run; idempotence comes from the incentive dedup
    /// key, not from delta tracking.
    async fn all(&self) -> Result<Vec<Sale>>;

    /// Count and amount sum of one salesman's sales at or after `since`.
    /// Empty sets yield `(0, 0.0)`.
    async fn count_and_sum_since(
        &self,
        salesman_id: i64,
        since: DateTime<Utc>,
    ) -> Result<(i64, f64)>;

    /// Amount sum of one salesman's sales within an inclusive window.
    async fn sum_amount(&self, salesman_id: i64, window: &TimeWindow) -> Result<f64>;

    /// Admin listing rows: date-range and search filters applied in the
    /// store, salesman name/outlet resolved via left join (`None` when the
    /// salesman is gone), ordered timestamp descending. `limit` of `None`
    /// means uncapped (export path).
    async fn admin_rows(&self, filter: &SalesFilter, limit: Option<u64>)
        -> Result<Vec<AdminSaleRow>>;
}
