//! Incentive accrual engine.
//!
//! Rescans the whole sale table every run and reconciles each sale against
//! the imported ground truth. A sale earns an incentive only when an
//! actual-sale record with the identical (customer, barcode, qty,
//! net_amount) key exists, its product maps to a trait, and that trait
//! carries a positive percentage. Everything that fails a lookup is
//! silently skipped: most sales are expected not to qualify.
//!
//! The full rescan is O(sales x lookups) with no delta tracking. That is
//! the contract, not an accident: re-running is safe because the incentive
//! dedup key turns every already-credited candidate into a counted skip.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;

use crate::interfaces::{CatalogStore, IncentiveStore, Result, SaleStore};
use crate::model::{Accrual, AccrualReport, ActualSaleKey};

/// Matches sales against ground truth and credits incentives.
pub struct AccrualEngine {
    sales: Arc<dyn SaleStore>,
    catalog: Arc<dyn CatalogStore>,
    incentives: Arc<dyn IncentiveStore>,
    /// Serializes runs in-process; the storage unique constraint covers
    /// whatever this lock cannot see.
    run_lock: Mutex<()>,
}

impl AccrualEngine {
    pub fn new(
        sales: Arc<dyn SaleStore>,
        catalog: Arc<dyn CatalogStore>,
        incentives: Arc<dyn IncentiveStore>,
    ) -> Self {
        Self {
            sales,
            catalog,
            incentives,
            run_lock: Mutex::new(()),
        }
    }

    /// Run one accrual pass over the full sale table.
    ///
    /// All writes land in a single storage transaction: either every
    /// created incentive and wallet credit of this run commits, or none
    /// do and the error propagates to the caller.
    pub async fn generate(&self) -> Result<AccrualReport> {
        let _guard = self.run_lock.lock().await;

        let sales = self.sales.all().await?;
        let mut accruals = Vec::new();

        for sale in &sales {
            let key = ActualSaleKey {
                customer: sale.customer_number.clone(),
                barcode: sale.barcode.clone(),
                qty: sale.qty,
                net_amount: sale.net_amount,
            };
            let Some(actual) = self.catalog.find_actual_sale(&key).await? else {
                continue;
            };
            let Some(product) = self.catalog.product_by_barcode(&sale.barcode).await? else {
                continue;
            };
            let Some(cfg) = self.catalog.trait_config(&product.trait_name).await? else {
                continue;
            };
            if cfg.percentage <= 0.0 {
                continue;
            }

            accruals.push(Accrual {
                salesman_id: sale.salesman_id,
                barcode: sale.barcode.clone(),
                trait_name: product.trait_name,
                amount: actual.net_amount * cfg.percentage,
                is_visible: cfg.is_visible,
                timestamp: Utc::now(),
            });
        }

        let report = self.incentives.apply_accruals(&accruals).await?;

        info!(
            scanned = sales.len(),
            matched = accruals.len(),
            created = report.created,
            skipped_duplicates = report.skipped_duplicates,
            "accrual pass complete"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ActualSale, Product, Sale, Salesman, TraitConfig};
    use crate::storage::MockLedger;

    fn engine(ledger: &Arc<MockLedger>) -> AccrualEngine {
        AccrualEngine::new(ledger.clone(), ledger.clone(), ledger.clone())
    }

    async fn seed_qualifying_sale(ledger: &MockLedger) -> i64 {
        let salesman_id = ledger
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
            .add_sale(Sale {
                id: 0,
                salesman_id,
                customer_name: "C1".to_string(),
                customer_number: "7000000001".to_string(),
                barcode: "B1".to_string(),
                qty: 2,
                amount: 120.0,
                net_amount: 100.0,
                timestamp: Utc::now(),
            })
            .await;
        ledger
            .add_actual_sale(ActualSale {
                id: 0,
                customer: "7000000001".to_string(),
                barcode: "B1".to_string(),
                qty: 2,
                net_amount: 100.0,
            })
            .await;
        ledger
            .add_product(Product {
                id: 0,
                barcode: "B1".to_string(),
                trait_name: "T1".to_string(),
            })
            .await;
        ledger
            .add_trait_config(TraitConfig {
                id: 0,
                trait_name: "T1".to_string(),
                percentage: 0.05,
                is_visible: true,
            })
            .await;
        salesman_id
    }

    #[tokio::test]
    async fn qualifying_sale_earns_percentage_of_net_amount() {
        let ledger = Arc::new(MockLedger::new());
        let salesman_id = seed_qualifying_sale(&ledger).await;

        let report = engine(&ledger).generate().await.unwrap();

        assert_eq!(report, AccrualReport { created: 1, skipped_duplicates: 0 });
        assert_eq!(ledger.wallet_balance(salesman_id).await, 5.0);
    }

    #[tokio::test]
    async fn second_run_skips_and_leaves_wallet_unchanged() {
        let ledger = Arc::new(MockLedger::new());
        let salesman_id = seed_qualifying_sale(&ledger).await;
        let engine = engine(&ledger);

        engine.generate().await.unwrap();
        let second = engine.generate().await.unwrap();

        assert_eq!(second, AccrualReport { created: 0, skipped_duplicates: 1 });
        assert_eq!(ledger.wallet_balance(salesman_id).await, 5.0);
        assert_eq!(ledger.incentive_count().await, 1);
    }

    #[tokio::test]
    async fn unmatched_sale_is_silently_ignored() {
        let ledger = Arc::new(MockLedger::new());
        let salesman_id = ledger
            .add_salesman(Salesman {
                id: 0,
                name: "Ravi".to_string(),
                mobile: "9000000002".to_string(),
                outlet: "North".to_string(),
                vertical: "appliances".to_string(),
                is_approved: true,
                wallet_balance: 0.0,
            })
            .await;
        ledger
            .add_sale(Sale {
                id: 0,
                salesman_id,
                customer_name: "C2".to_string(),
                customer_number: "7000000002".to_string(),
                barcode: "B9".to_string(),
                qty: 1,
                amount: 50.0,
                net_amount: 45.0,
                timestamp: Utc::now(),
            })
            .await;

        let report = engine(&ledger).generate().await.unwrap();

        assert_eq!(report, AccrualReport::default());
        assert_eq!(ledger.wallet_balance(salesman_id).await, 0.0);
    }

    #[tokio::test]
    async fn zero_percentage_trait_earns_nothing() {
        let ledger = Arc::new(MockLedger::new());
        let salesman_id = ledger
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
            .add_sale(Sale {
                id: 0,
                salesman_id,
                customer_name: "C1".to_string(),
                customer_number: "7000000001".to_string(),
                barcode: "B1".to_string(),
                qty: 2,
                amount: 120.0,
                net_amount: 100.0,
                timestamp: Utc::now(),
            })
            .await;
        ledger
            .add_actual_sale(ActualSale {
                id: 0,
                customer: "7000000001".to_string(),
                barcode: "B1".to_string(),
                qty: 2,
                net_amount: 100.0,
            })
            .await;
        ledger
            .add_product(Product {
                id: 0,
                barcode: "B1".to_string(),
                trait_name: "T1".to_string(),
            })
            .await;
        ledger
            .add_trait_config(TraitConfig {
                id: 0,
                trait_name: "T1".to_string(),
                percentage: 0.0,
                is_visible: true,
            })
            .await;

        let report = engine(&ledger).generate().await.unwrap();

        assert_eq!(report, AccrualReport::default());
        assert_eq!(ledger.wallet_balance(salesman_id).await, 0.0);
        assert_eq!(ledger.incentive_count().await, 0);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let ledger = Arc::new(MockLedger::new());
        seed_qualifying_sale(&ledger).await;
        ledger.set_fail_on_apply(true).await;

        assert!(engine(&ledger).generate().await.is_err());
        assert_eq!(ledger.incentive_count().await, 0);
    }
}
