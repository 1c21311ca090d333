//! Incentive read and visibility operations.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::interfaces::{IncentiveStore, Result};
use crate::model::{Incentive, IncentiveView, Period};
use crate::utils::time::listing_window;

pub struct IncentiveService {
    incentives: Arc<dyn IncentiveStore>,
}

impl IncentiveService {
    pub fn new(incentives: Arc<dyn IncentiveStore>) -> Self {
        Self { incentives }
    }

    /// Incentives a salesman is allowed to see. Hidden rows stay in the
    /// wallet balance but never appear here.
    pub async fn visible_for_salesman(&self, salesman_id: i64) -> Result<Vec<Incentive>> {
        self.incentives.visible_for_salesman(salesman_id).await
    }

    /// Admin listing of all incentives in the period, hidden included,
    /// each joined to its salesman's name.
    pub async fn list_all(&self, period: Period) -> Result<Vec<IncentiveView>> {
        let window = listing_window(period, Utc::now());
        self.incentives.list_with_salesman(&window).await
    }

    /// Flip an incentive's visibility. The wallet balance is untouched;
    /// visibility only controls what the salesman-facing view shows.
    pub async fn toggle_visibility(&self, incentive_id: i64, is_visible: bool) -> Result<Incentive> {
        let incentive = self.incentives.set_visibility(incentive_id, is_visible).await?;
        debug!(incentive_id, is_visible, "incentive visibility updated");
        Ok(incentive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Accrual, Salesman};
    use crate::storage::MockLedger;

    fn accrual(salesman_id: i64, barcode: &str, visible: bool) -> Accrual {
        Accrual {
            salesman_id,
            barcode: barcode.to_string(),
            trait_name: "T1".to_string(),
            amount: 10.0,
            is_visible: visible,
            timestamp: Utc::now(),
        }
    }

    async fn seeded() -> (Arc<MockLedger>, i64) {
        let ledger = Arc::new(MockLedger::new());
        let id = ledger
            .add_salesman(Salesman {
                id: 0,
                name: "Asha".to_string(),
                mobile: "9000000001".to_string(),
                outlet: "Central".to_string(),
                vertical: "electronics".to_string(),
                is_approved: true,
                wallet_balance: 0.0,
            })
            .await;
        ledger
            .apply_accruals(&[accrual(id, "B1", true), accrual(id, "B2", false)])
            .await
            .unwrap();
        (ledger, id)
    }

    #[tokio::test]
    async fn hidden_incentives_do_not_reach_the_salesman_view() {
        let (ledger, id) = seeded().await;
        let service = IncentiveService::new(ledger.clone());

        let visible = service.visible_for_salesman(id).await.unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].barcode, "B1");
        // Both rows credited the wallet regardless of visibility.
        assert_eq!(ledger.wallet_balance(id).await, 20.0);
    }

    #[tokio::test]
    async fn admin_listing_includes_hidden_rows() {
        let (ledger, _) = seeded().await;
        let service = IncentiveService::new(ledger);

        let all = service.list_all(Period::Total).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|v| !v.is_visible));
        assert!(all.iter().all(|v| v.salesman_name == "Asha"));
    }

    #[tokio::test]
    async fn toggling_visibility_leaves_the_wallet_alone() {
        let (ledger, id) = seeded().await;
        let service = IncentiveService::new(ledger.clone());

        let all = service.list_all(Period::Total).await.unwrap();
        let target = all.iter().find(|v| v.is_visible).unwrap().id;

        let updated = service.toggle_visibility(target, false).await.unwrap();
        assert!(!updated.is_visible);
        assert_eq!(ledger.wallet_balance(id).await, 20.0);
        assert!(service.visible_for_salesman(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggling_a_missing_incentive_is_not_found() {
        let ledger = Arc::new(MockLedger::new());
        let service = IncentiveService::new(ledger);
        let err = service.toggle_visibility(99, true).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
