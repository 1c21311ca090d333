//! Mock storage implementation for testing.
//!
//! One in-memory ledger implements every store trait. The five traits
//! describe views over a single coherent dataset, so a single struct with
//! one lock keeps test state consistent without wiring five mocks
//! together.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::interfaces::{
    CatalogStore, ClaimStore, IncentiveStore, Result, SaleStore, SalesmanStore, StorageError,
};
use crate::model::{
    Accrual, AccrualReport, ActualSale, ActualSaleKey, AdminSaleRow, Claim, ClaimStatus,
    Incentive, IncentiveView, NewSale, Product, Sale, SalesFilter, Salesman, TraitConfig,
};
use crate::utils::time::TimeWindow;

#[cfg(test)]
mod tests;

#[derive(Default)]
struct Inner {
    salesmen: Vec<Salesman>,
    sales: Vec<Sale>,
    actual_sales: Vec<ActualSale>,
    products: Vec<Product>,
    trait_configs: Vec<TraitConfig>,
    incentives: Vec<Incentive>,
    claims: Vec<Claim>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-memory ledger that implements all store traits.
#[derive(Default)]
pub struct MockLedger {
    inner: RwLock<Inner>,
    fail_on_apply: RwLock<bool>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `apply_accruals` call fail before writing anything.
    pub async fn set_fail_on_apply(&self, fail: bool) {
        *self.fail_on_apply.write().await = fail;
    }

    /// Seed a salesman; the given id is replaced with a fresh one.
    pub async fn add_salesman(&self, salesman: Salesman) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.salesmen.push(Salesman { id, ..salesman });
        id
    }

    pub async fn add_sale(&self, sale: Sale) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.sales.push(Sale { id, ..sale });
        id
    }

    pub async fn add_actual_sale(&self, actual: ActualSale) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.actual_sales.push(ActualSale { id, ..actual });
        id
    }

    pub async fn add_product(&self, product: Product) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.products.push(Product { id, ..product });
        id
    }

    pub async fn add_trait_config(&self, cfg: TraitConfig) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.trait_configs.push(TraitConfig { id, ..cfg });
        id
    }

    pub async fn add_claim(&self, claim: Claim) -> i64 {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        inner.claims.push(Claim { id, ..claim });
        id
    }

    /// Current wallet balance, 0 when the salesman does not exist.
    pub async fn wallet_balance(&self, salesman_id: i64) -> f64 {
        let inner = self.inner.read().await;
        inner
            .salesmen
            .iter()
            .find(|s| s.id == salesman_id)
            .map(|s| s.wallet_balance)
            .unwrap_or(0.0)
    }

    pub async fn incentive_count(&self) -> usize {
        self.inner.read().await.incentives.len()
    }
}

#[async_trait]
impl SalesmanStore for MockLedger {
    async fn get(&self, salesman_id: i64) -> Result<Option<Salesman>> {
        let inner = self.inner.read().await;
        Ok(inner.salesmen.iter().find(|s| s.id == salesman_id).cloned())
    }

    async fn approved(&self) -> Result<Vec<Salesman>> {
        let inner = self.inner.read().await;
        Ok(inner
            .salesmen
            .iter()
            .filter(|s| s.is_approved)
            .cloned()
            .collect())
    }

    async fn remove(&self, salesman_id: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        let before = inner.salesmen.len();
        inner
            .salesmen
            .retain(|s| !(s.id == salesman_id && s.is_approved));
        if inner.salesmen.len() == before {
            return Err(StorageError::NotFound {
                entity: "salesman",
                id: salesman_id,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SaleStore for MockLedger {
    async fn submit(&self, sale: NewSale, salesman_id: i64) -> Result<Sale> {
        let mut inner = self.inner.write().await;
        let id = inner.next_id();
        let sale = Sale {
            id,
            salesman_id,
            customer_name: sale.customer_name,
            customer_number: sale.customer_number,
            barcode: sale.barcode,
            qty: sale.qty,
            amount: sale.amount,
            net_amount: sale.net_amount,
            timestamp: chrono::Utc::now(),
        };
        inner.sales.push(sale.clone());
        Ok(sale)
    }

    async fn by_salesman(&self, salesman_id: i64) -> Result<Vec<Sale>> {
        let inner = self.inner.read().await;
        let mut sales: Vec<Sale> = inner
            .sales
            .iter()
            .filter(|s| s.salesman_id == salesman_id)
            .cloned()
            .collect();
        sales.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(sales)
    }

    async fn all(&self) -> Result<Vec<Sale>> {
        let inner = self.inner.read().await;
        let mut sales = inner.sales.clone();
        sales.sort_by_key(|s| s.id);
        Ok(sales)
    }

    async fn count_and_sum_since(
        &self,
        salesman_id: i64,
        since: chrono::DateTime<chrono::Utc>,
    ) -> Result<(i64, f64)> {
        let inner = self.inner.read().await;
        let matching = inner
            .sales
            .iter()
            .filter(|s| s.salesman_id == salesman_id && s.timestamp >= since);
        let mut count = 0;
        let mut sum = 0.0;
        for sale in matching {
            count += 1;
            sum += sale.amount;
        }
        Ok((count, sum))
    }

    async fn sum_amount(&self, salesman_id: i64, window: &TimeWindow) -> Result<f64> {
        let inner = self.inner.read().await;
        Ok(inner
            .sales
            .iter()
            .filter(|s| s.salesman_id == salesman_id && window.contains(s.timestamp))
            .map(|s| s.amount)
            .sum())
    }

    async fn admin_rows(
        &self,
        filter: &SalesFilter,
        limit: Option<u64>,
    ) -> Result<Vec<AdminSaleRow>> {
        let inner = self.inner.read().await;

        let term = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut rows: Vec<AdminSaleRow> = inner
            .sales
            .iter()
            .filter(|s| {
                filter
                    .from
                    .map_or(true, |d| s.timestamp.date_naive() >= d)
                    && filter.to.map_or(true, |d| s.timestamp.date_naive() <= d)
            })
            .filter(|s| {
                term.as_deref().map_or(true, |t| {
                    s.customer_name.to_lowercase().contains(t)
                        || s.customer_number.to_lowercase().contains(t)
                        || s.barcode.to_lowercase().contains(t)
                })
            })
            .map(|s| {
                let salesman = inner.salesmen.iter().find(|m| m.id == s.salesman_id);
                AdminSaleRow {
                    timestamp: s.timestamp,
                    customer_name: s.customer_name.clone(),
                    customer_number: s.customer_number.clone(),
                    barcode: s.barcode.clone(),
                    qty: s.qty,
                    amount: s.amount,
                    salesman_name: salesman.map(|m| m.name.clone()),
                    outlet: salesman.map(|m| m.outlet.clone()),
                }
            })
            .collect();

        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = limit {
            rows.truncate(limit as usize);
        }

        Ok(rows)
    }
}

#[async_trait]
impl CatalogStore for MockLedger {
    async fn find_actual_sale(&self, key: &ActualSaleKey) -> Result<Option<ActualSale>> {
        let inner = self.inner.read().await;
        Ok(inner
            .actual_sales
            .iter()
            .find(|a| {
                a.customer == key.customer
                    && a.barcode == key.barcode
                    && a.qty == key.qty
                    && a.net_amount == key.net_amount
            })
            .cloned())
    }

    async fn product_by_barcode(&self, barcode: &str) -> Result<Option<Product>> {
        let inner = self.inner.read().await;
        Ok(inner
            .products
            .iter()
            .find(|p| p.barcode == barcode)
            .cloned())
    }

    async fn trait_config(&self, trait_name: &str) -> Result<Option<TraitConfig>> {
        let inner = self.inner.read().await;
        Ok(inner
            .trait_configs
            .iter()
            .find(|c| c.trait_name == trait_name)
            .cloned())
    }
}

#[async_trait]
impl IncentiveStore for MockLedger {
    async fn apply_accruals(&self, accruals: &[Accrual]) -> Result<AccrualReport> {
        if *self.fail_on_apply.read().await {
            return Err(StorageError::Backend("injected failure".to_string()));
        }

        // The write lock makes the whole batch atomic; nothing below can
        // fail, so no staging is needed to preserve all-or-nothing.
        let mut inner = self.inner.write().await;
        let mut report = AccrualReport::default();

        for accrual in accruals {
            let exists = inner.incentives.iter().any(|i| {
                i.salesman_id == accrual.salesman_id
                    && i.barcode == accrual.barcode
                    && i.trait_name == accrual.trait_name
            });
            if exists {
                report.skipped_duplicates += 1;
                continue;
            }

            let id = inner.next_id();
            inner.incentives.push(Incentive {
                id,
                salesman_id: accrual.salesman_id,
                barcode: accrual.barcode.clone(),
                trait_name: accrual.trait_name.clone(),
                amount: accrual.amount,
                is_visible: accrual.is_visible,
                timestamp: accrual.timestamp,
            });
            if let Some(salesman) = inner
                .salesmen
                .iter_mut()
                .find(|s| s.id == accrual.salesman_id)
            {
                salesman.wallet_balance += accrual.amount;
            }
            report.created += 1;
        }

        Ok(report)
    }

    async fn visible_for_salesman(&self, salesman_id: i64) -> Result<Vec<Incentive>> {
        let inner = self.inner.read().await;
        Ok(inner
            .incentives
            .iter()
            .filter(|i| i.salesman_id == salesman_id && i.is_visible)
            .cloned()
            .collect())
    }

    async fn list_with_salesman(&self, window: &TimeWindow) -> Result<Vec<IncentiveView>> {
        let inner = self.inner.read().await;
        let mut views: Vec<IncentiveView> = inner
            .incentives
            .iter()
            .filter(|i| window.contains(i.timestamp))
            .filter_map(|i| {
                // Inner-join semantics: drop rows with no salesman.
                let salesman = inner.salesmen.iter().find(|s| s.id == i.salesman_id)?;
                Some(IncentiveView {
                    id: i.id,
                    barcode: i.barcode.clone(),
                    trait_name: i.trait_name.clone(),
                    amount: i.amount,
                    timestamp: i.timestamp,
                    is_visible: i.is_visible,
                    salesman_name: salesman.name.clone(),
                })
            })
            .collect();
        views.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(views)
    }

    async fn set_visibility(&self, incentive_id: i64, is_visible: bool) -> Result<Incentive> {
        let mut inner = self.inner.write().await;
        let incentive = inner
            .incentives
            .iter_mut()
            .find(|i| i.id == incentive_id)
            .ok_or(StorageError::NotFound {
                entity: "incentive",
                id: incentive_id,
            })?;
        incentive.is_visible = is_visible;
        Ok(incentive.clone())
    }

    async fn sum_amount(&self, salesman_id: i64, window: &TimeWindow) -> Result<f64> {
        let inner = self.inner.read().await;
        Ok(inner
            .incentives
            .iter()
            .filter(|i| i.salesman_id == salesman_id && window.contains(i.timestamp))
            .map(|i| i.amount)
            .sum())
    }
}

#[async_trait]
impl ClaimStore for MockLedger {
    async fn sum_settled(&self, salesman_id: i64) -> Result<f64> {
        let inner = self.inner.read().await;
        Ok(inner
            .claims
            .iter()
            .filter(|c| {
                c.salesman_id == salesman_id && ClaimStatus::SETTLED.contains(&c.status)
            })
            .map(|c| c.amount)
            .sum())
    }
}
