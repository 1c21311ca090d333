//! Aggregation queries over sales, incentives and claims.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::interfaces::{
    ClaimStore, IncentiveStore, Result, SaleStore, SalesmanStore, StorageError,
};
use crate::model::{AdminSaleRow, Period, SalesFilter, SalesmanStats, SalesmanSummary};
use crate::utils::time::{day_start, month_start, summary_window, TimeWindow};

/// Row cap for the interactive admin sales listing. The export path is
/// uncapped.
pub const ADMIN_SALES_LIMIT: u64 = 500;

pub struct ReportingService {
    salesmen: Arc<dyn SalesmanStore>,
    sales: Arc<dyn SaleStore>,
    incentives: Arc<dyn IncentiveStore>,
    claims: Arc<dyn ClaimStore>,
}

impl ReportingService {
    pub fn new(
        salesmen: Arc<dyn SalesmanStore>,
        sales: Arc<dyn SaleStore>,
        incentives: Arc<dyn IncentiveStore>,
        claims: Arc<dyn ClaimStore>,
    ) -> Self {
        Self {
            salesmen,
            sales,
            incentives,
            claims,
        }
    }

    /// Dashboard numbers for one salesman: month-to-date and today sale
    /// counts and amounts, today's incentive sum, and the wallet balance.
    pub async fn salesman_stats(&self, salesman_id: i64) -> Result<SalesmanStats> {
        let salesman = self
            .salesmen
            .get(salesman_id)
            .await?
            .ok_or(StorageError::NotFound {
                entity: "salesman",
                id: salesman_id,
            })?;

        let now = Utc::now();
        let (month_count, month_amount) = self
            .sales
            .count_and_sum_since(salesman_id, month_start(now))
            .await?;
        let (today_count, today_amount) = self
            .sales
            .count_and_sum_since(salesman_id, day_start(now))
            .await?;
        let today_incentive = self
            .incentives
            .sum_amount(salesman_id, &TimeWindow::since(day_start(now)))
            .await?;

        Ok(SalesmanStats {
            month_sales_count: month_count,
            month_sales_amount: month_amount,
            today_sales_count: today_count,
            today_sales_amount: today_amount,
            today_incentive,
            wallet_balance: salesman.wallet_balance,
        })
    }

    /// Per-salesman totals over every approved salesman.
    ///
    /// Sale and incentive sums are windowed by `period`; the claimed total
    /// is always all-time, counting approved and paid claims only.
    pub async fn salesman_summaries(&self, period: Period) -> Result<Vec<SalesmanSummary>> {
        let window = summary_window(period, Utc::now());
        let salesmen = self.salesmen.approved().await?;

        let mut summaries = Vec::with_capacity(salesmen.len());
        for salesman in salesmen {
            let total_sales = self.sales.sum_amount(salesman.id, &window).await?;
            let total_incentive = self.incentives.sum_amount(salesman.id, &window).await?;
            let total_claimed = self.claims.sum_settled(salesman.id).await?;
            summaries.push(SalesmanSummary {
                id: salesman.id,
                name: salesman.name,
                mobile: salesman.mobile,
                outlet: salesman.outlet,
                total_sales,
                total_incentive,
                total_claimed,
                wallet_balance: salesman.wallet_balance,
            });
        }

        debug!(period = %period, count = summaries.len(), "built salesman summaries");
        Ok(summaries)
    }

    /// Interactive admin sales listing, capped at [`ADMIN_SALES_LIMIT`]
    /// rows after filtering.
    pub async fn admin_sales(&self, filter: &SalesFilter) -> Result<Vec<AdminSaleRow>> {
        // The outlet filter runs after the store query, so the cap can only
        // be pushed down when no outlet is requested.
        let store_limit = filter.outlet.is_none().then_some(ADMIN_SALES_LIMIT);
        let rows = self.filtered_rows(filter, store_limit).await?;
        Ok(rows
            .into_iter()
            .take(ADMIN_SALES_LIMIT as usize)
            .collect())
    }

    /// Uncapped variant feeding the export writer.
    pub async fn admin_sales_for_export(&self, filter: &SalesFilter) -> Result<Vec<AdminSaleRow>> {
        self.filtered_rows(filter, None).await
    }

    /// Date and search filters run in the store; the outlet filter runs
    /// here because outlet lives on the salesman, not the sale. A row
    /// whose salesman cannot be resolved never passes a non-empty outlet
    /// filter.
    async fn filtered_rows(
        &self,
        filter: &SalesFilter,
        limit: Option<u64>,
    ) -> Result<Vec<AdminSaleRow>> {
        let rows = self.sales.admin_rows(filter, limit).await?;
        match filter.outlet.as_deref() {
            Some(outlet) => Ok(rows
                .into_iter()
                .filter(|r| r.outlet.as_deref() == Some(outlet))
                .collect()),
            None => Ok(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};

    use super::*;
    use crate::model::{Accrual, Claim, ClaimStatus, Sale, Salesman};
    use crate::storage::MockLedger;

    fn salesman(name: &str, outlet: &str) -> Salesman {
        Salesman {
            id: 0,
            name: name.to_string(),
            mobile: "9000000000".to_string(),
            outlet: outlet.to_string(),
            vertical: "electronics".to_string(),
            is_approved: true,
            wallet_balance: 0.0,
        }
    }

    fn sale(salesman_id: i64, amount: f64, ts: DateTime<Utc>) -> Sale {
        Sale {
            id: 0,
            salesman_id,
            customer_name: "C".to_string(),
            customer_number: "7000000000".to_string(),
            barcode: "B1".to_string(),
            qty: 1,
            amount,
            net_amount: amount,
            timestamp: ts,
        }
    }

    fn service(ledger: &Arc<MockLedger>) -> ReportingService {
        ReportingService::new(
            ledger.clone(),
            ledger.clone(),
            ledger.clone(),
            ledger.clone(),
        )
    }

    #[tokio::test]
    async fn stats_split_today_from_month() {
        let ledger = Arc::new(MockLedger::new());
        let id = ledger.add_salesman(salesman("Asha", "Central")).await;

        let now = Utc::now();
        ledger.add_sale(sale(id, 100.0, now)).await;
        // Old enough to fall outside both today and the current month.
        ledger.add_sale(sale(id, 40.0, now - Duration::days(45))).await;

        let stats = service(&ledger).salesman_stats(id).await.unwrap();
        assert_eq!(stats.today_sales_count, 1);
        assert_eq!(stats.today_sales_amount, 100.0);
        assert!(stats.month_sales_count >= 1);
        assert!(stats.month_sales_amount >= 100.0);
    }

    #[tokio::test]
    async fn stats_for_missing_salesman_is_not_found() {
        let ledger = Arc::new(MockLedger::new());
        let err = service(&ledger).salesman_stats(7).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn claimed_total_counts_only_settled_statuses() {
        let ledger = Arc::new(MockLedger::new());
        let id = ledger.add_salesman(salesman("Asha", "Central")).await;
        for (amount, status) in [
            (50.0, ClaimStatus::Approved),
            (30.0, ClaimStatus::Paid),
            (99.0, ClaimStatus::Pending),
            (70.0, ClaimStatus::Rejected),
        ] {
            ledger
                .add_claim(Claim {
                    id: 0,
                    salesman_id: id,
                    amount,
                    status,
                    timestamp: Utc::now(),
                })
                .await;
        }

        let summaries = service(&ledger)
            .salesman_summaries(Period::Total)
            .await
            .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_claimed, 80.0);
    }

    #[tokio::test]
    async fn claimed_total_ignores_the_period_window() {
        let ledger = Arc::new(MockLedger::new());
        let id = ledger.add_salesman(salesman("Asha", "Central")).await;
        ledger
            .add_claim(Claim {
                id: 0,
                salesman_id: id,
                amount: 25.0,
                status: ClaimStatus::Paid,
                timestamp: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            })
            .await;

        let summaries = service(&ledger)
            .salesman_summaries(Period::Today)
            .await
            .unwrap();
        assert_eq!(summaries[0].total_claimed, 25.0);
    }

    #[tokio::test]
    async fn summaries_window_sales_and_incentives_by_period() {
        let ledger = Arc::new(MockLedger::new());
        let id = ledger.add_salesman(salesman("Asha", "Central")).await;

        let now = Utc::now();
        ledger.add_sale(sale(id, 100.0, now)).await;
        ledger.add_sale(sale(id, 40.0, now - Duration::days(45))).await;
        ledger
            .apply_accruals(&[Accrual {
                salesman_id: id,
                barcode: "B1".to_string(),
                trait_name: "T1".to_string(),
                amount: 5.0,
                is_visible: true,
                timestamp: now,
            }])
            .await
            .unwrap();

        let svc = service(&ledger);
        let today = svc.salesman_summaries(Period::Today).await.unwrap();
        assert_eq!(today[0].total_sales, 100.0);
        assert_eq!(today[0].total_incentive, 5.0);

        let total = svc.salesman_summaries(Period::Total).await.unwrap();
        assert_eq!(total[0].total_sales, 140.0);
    }

    #[tokio::test]
    async fn outlet_filter_drops_unresolved_rows() {
        let ledger = Arc::new(MockLedger::new());
        let central = ledger.add_salesman(salesman("Asha", "Central")).await;
        let north = ledger.add_salesman(salesman("Ravi", "North")).await;
        let now = Utc::now();
        ledger.add_sale(sale(central, 100.0, now)).await;
        ledger.add_sale(sale(north, 60.0, now)).await;
        // Sale whose salesman no longer exists.
        ledger.add_sale(sale(9999, 10.0, now)).await;

        let svc = service(&ledger);
        let all = svc.admin_sales(&SalesFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|r| r.salesman_label() == "Unknown"));

        let filter = SalesFilter {
            outlet: Some("Central".to_string()),
            ..Default::default()
        };
        let central_only = svc.admin_sales(&filter).await.unwrap();
        assert_eq!(central_only.len(), 1);
        assert_eq!(central_only[0].amount, 100.0);
    }

    #[tokio::test]
    async fn listing_is_capped_but_export_is_not() {
        let ledger = Arc::new(MockLedger::new());
        let id = ledger.add_salesman(salesman("Asha", "Central")).await;
        let now = Utc::now();
        for i in 0..(ADMIN_SALES_LIMIT + 10) {
            ledger.add_sale(sale(id, i as f64, now)).await;
        }

        let svc = service(&ledger);
        let listed = svc.admin_sales(&SalesFilter::default()).await.unwrap();
        assert_eq!(listed.len(), ADMIN_SALES_LIMIT as usize);

        let exported = svc
            .admin_sales_for_export(&SalesFilter::default())
            .await
            .unwrap();
        assert_eq!(exported.len(), (ADMIN_SALES_LIMIT + 10) as usize);
    }
}
