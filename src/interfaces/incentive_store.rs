//! Incentive persistence interface.

use async_trait::async_trait;

use crate::interfaces::Result;
use crate::model::{Accrual, AccrualReport, Incentive, IncentiveView};
use crate::utils::time::TimeWindow;

#[async_trait]
pub trait IncentiveStore: Send + Sync {
    /// Apply one accrual batch atomically.
    ///
    /// Per candidate: insert-or-skip on the (salesman_id, barcode,
    /// trait_name) dedup key; an insert also credits the amount to the
    /// owning salesman's wallet balance. The whole batch commits once or
    /// rolls back entirely; partial credit never persists.
    async fn apply_accruals(&self, accruals: &[Accrual]) -> Result<AccrualReport>;

    /// Visible incentives for one salesman. Hidden rows never reach the
    /// salesman-facing view even though they were credited to the wallet.
    async fn visible_for_salesman(&self, salesman_id: i64) -> Result<Vec<Incentive>>;

    /// All incentives within a window, joined to the salesman display
    /// name, ordered timestamp descending.
    async fn list_with_salesman(&self, window: &TimeWindow) -> Result<Vec<IncentiveView>>;

    /// Update an incentive's visibility flag and return the persisted row.
    /// `NotFound` when the id does not exist. Never touches the wallet.
    async fn set_visibility(&self, incentive_id: i64, is_visible: bool) -> Result<Incentive>;

    /// Amount sum of one salesman's incentives within an inclusive window.
    async fn sum_amount(&self, salesman_id: i64, window: &TimeWindow) -> Result<f64>;
}
