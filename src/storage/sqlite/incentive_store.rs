//! SQLite IncentiveStore implementation.

use async_trait::async_trait;
use sea_query::{Alias, Expr, OnConflict, Order, Query, SqliteQueryBuilder};
use sqlx::{Row, SqliteConnection, SqlitePool};

use crate::interfaces::{IncentiveStore, Result, StorageError};
use crate::model::{Accrual, AccrualReport, Incentive, IncentiveView};
use crate::storage::schema::{Incentives, Salesmen};
use crate::storage::sqlite::decode_ts;
use crate::utils::time::{format_ts, TimeWindow};

/// SQLite implementation of IncentiveStore.
pub struct SqliteIncentiveStore {
    pool: SqlitePool,
}

impl SqliteIncentiveStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert accruals within an already-started transaction.
    ///
    /// The UNIQUE(salesman_id, barcode, trait) index decides creation:
    /// a conflicting insert affects zero rows and is counted as a
    /// duplicate skip. Wallet credit happens only on actual insert, so a
    /// second run over the same data never double-credits.
    async fn insert_accruals(
        conn: &mut SqliteConnection,
        accruals: &[Accrual],
        report: &mut AccrualReport,
    ) -> Result<()> {
        for accrual in accruals {
            let insert = Query::insert()
                .into_table(Incentives::Table)
                .columns([
                    Incentives::SalesmanId,
                    Incentives::Barcode,
                    Incentives::Trait,
                    Incentives::Amount,
                    Incentives::IsVisible,
                    Incentives::Timestamp,
                ])
                .values_panic([
                    accrual.salesman_id.into(),
                    accrual.barcode.as_str().into(),
                    accrual.trait_name.as_str().into(),
                    accrual.amount.into(),
                    accrual.is_visible.into(),
                    format_ts(accrual.timestamp).into(),
                ])
                .on_conflict(
                    OnConflict::columns([
                        Incentives::SalesmanId,
                        Incentives::Barcode,
                        Incentives::Trait,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .to_string(SqliteQueryBuilder);

            let inserted = sqlx::query(&insert).execute(&mut *conn).await?.rows_affected();
            if inserted == 0 {
                report.skipped_duplicates += 1;
                continue;
            }

            // Silent when the salesman row is gone, matching the lookup
            // semantics of the matching pass.
            let credit = Query::update()
                .table(Salesmen::Table)
                .value(
                    Salesmen::WalletBalance,
                    Expr::col(Salesmen::WalletBalance).add(accrual.amount),
                )
                .and_where(Expr::col(Salesmen::Id).eq(accrual.salesman_id))
                .to_string(SqliteQueryBuilder);

            sqlx::query(&credit).execute(&mut *conn).await?;
            report.created += 1;
        }

        Ok(())
    }
}

fn row_to_incentive(row: &sqlx::sqlite::SqliteRow) -> Result<Incentive> {
    let raw_ts: String = row.get("timestamp");
    Ok(Incentive {
        id: row.get("id"),
        salesman_id: row.get("salesman_id"),
        barcode: row.get("barcode"),
        trait_name: row.get("trait"),
        amount: row.get("amount"),
        is_visible: row.get("is_visible"),
        timestamp: decode_ts(&raw_ts)?,
    })
}

const INCENTIVE_COLUMNS: [Incentives; 7] = [
    Incentives::Id,
    Incentives::SalesmanId,
    Incentives::Barcode,
    Incentives::Trait,
    Incentives::Amount,
    Incentives::IsVisible,
    Incentives::Timestamp,
];

#[async_trait]
impl IncentiveStore for SqliteIncentiveStore {
    async fn apply_accruals(&self, accruals: &[Accrual]) -> Result<AccrualReport> {
        let mut report = AccrualReport::default();
        if accruals.is_empty() {
            return Ok(report);
        }

        // BEGIN IMMEDIATE acquires the write lock upfront, preventing
        // deadlocks when concurrent DEFERRED transactions race to upgrade
        // from shared to exclusive.
        let mut conn = self.pool.acquire().await?;
        sqlx::query("BEGIN IMMEDIATE").execute(&mut *conn).await?;

        let result = Self::insert_accruals(&mut conn, accruals, &mut report).await;

        match result {
            Ok(()) => {
                sqlx::query("COMMIT").execute(&mut *conn).await?;
                Ok(report)
            }
            Err(e) => {
                let _ = sqlx::query("ROLLBACK").execute(&mut *conn).await;
                Err(e)
            }
        }
    }

    async fn visible_for_salesman(&self, salesman_id: i64) -> Result<Vec<Incentive>> {
        let query = Query::select()
            .columns(INCENTIVE_COLUMNS)
            .from(Incentives::Table)
            .and_where(Expr::col(Incentives::SalesmanId).eq(salesman_id))
            .and_where(Expr::col(Incentives::IsVisible).eq(true))
            .order_by(Incentives::Id, Order::Asc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_incentive).collect()
    }

    async fn list_with_salesman(&self, window: &TimeWindow) -> Result<Vec<IncentiveView>> {
        // The statement holds Rc internals, so it must drop before the await.
        let sql = {
            let mut query = Query::select();
            query
                .column((Incentives::Table, Incentives::Id))
                .column((Incentives::Table, Incentives::Barcode))
                .column((Incentives::Table, Incentives::Trait))
                .column((Incentives::Table, Incentives::Amount))
                .column((Incentives::Table, Incentives::Timestamp))
                .column((Incentives::Table, Incentives::IsVisible))
                .expr_as(
                    Expr::col((Salesmen::Table, Salesmen::Name)),
                    Alias::new("salesman_name"),
                )
                .from(Incentives::Table)
                .inner_join(
                    Salesmen::Table,
                    Expr::col((Incentives::Table, Incentives::SalesmanId))
                        .equals((Salesmen::Table, Salesmen::Id)),
                )
                .order_by((Incentives::Table, Incentives::Timestamp), Order::Desc);

            if let Some(start) = window.start {
                query.and_where(
                    Expr::col((Incentives::Table, Incentives::Timestamp)).gte(format_ts(start)),
                );
            }
            if let Some(end) = window.end {
                query.and_where(
                    Expr::col((Incentives::Table, Incentives::Timestamp)).lte(format_ts(end)),
                );
            }

            query.to_string(SqliteQueryBuilder)
        };

        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let raw_ts: String = row.get("timestamp");
            views.push(IncentiveView {
                id: row.get("id"),
                barcode: row.get("barcode"),
                trait_name: row.get("trait"),
                amount: row.get("amount"),
                timestamp: decode_ts(&raw_ts)?,
                is_visible: row.get("is_visible"),
                salesman_name: row.get("salesman_name"),
            });
        }

        Ok(views)
    }

    async fn set_visibility(&self, incentive_id: i64, is_visible: bool) -> Result<Incentive> {
        let update = Query::update()
            .table(Incentives::Table)
            .value(Incentives::IsVisible, is_visible)
            .and_where(Expr::col(Incentives::Id).eq(incentive_id))
            .to_string(SqliteQueryBuilder);

        let affected = sqlx::query(&update).execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(StorageError::NotFound {
                entity: "incentive",
                id: incentive_id,
            });
        }

        let select = Query::select()
            .columns(INCENTIVE_COLUMNS)
            .from(Incentives::Table)
            .and_where(Expr::col(Incentives::Id).eq(incentive_id))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&select).fetch_one(&self.pool).await?;

        row_to_incentive(&row)
    }

    async fn sum_amount(&self, salesman_id: i64, window: &TimeWindow) -> Result<f64> {
        // The statement holds Rc internals, so it must drop before the await.
        let sql = {
            let mut query = Query::select();
            query
                .expr(Expr::col(Incentives::Amount).sum())
                .from(Incentives::Table)
                .and_where(Expr::col(Incentives::SalesmanId).eq(salesman_id));

            if let Some(start) = window.start {
                query.and_where(Expr::col(Incentives::Timestamp).gte(format_ts(start)));
            }
            if let Some(end) = window.end {
                query.and_where(Expr::col(Incentives::Timestamp).lte(format_ts(end)));
            }

            query.to_string(SqliteQueryBuilder)
        };

        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;

        let sum: Option<f64> = row.get(0);
        Ok(sum.unwrap_or(0.0))
    }
}
