//! SQLite SaleStore implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_query::{Alias, Cond, Expr, Func, Order, Query, SqliteQueryBuilder};
use sqlx::{Row, SqlitePool};

use crate::interfaces::{Result, SaleStore};
use crate::model::{AdminSaleRow, NewSale, Sale, SalesFilter};
use crate::storage::schema::{Sales, Salesmen};
use crate::storage::sqlite::decode_ts;
use crate::utils::time::{format_ts, TimeWindow};

/// SQLite implementation of SaleStore.
pub struct SqliteSaleStore {
    pool: SqlitePool,
}

impl SqliteSaleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_sale(row: &sqlx::sqlite::SqliteRow) -> Result<Sale> {
    let raw_ts: String = row.get("timestamp");
    Ok(Sale {
        id: row.get("id"),
        salesman_id: row.get("salesman_id"),
        customer_name: row.get("customer_name"),
        customer_number: row.get("customer_number"),
        barcode: row.get("barcode"),
        qty: row.get("qty"),
        amount: row.get("amount"),
        net_amount: row.get("net_amount"),
        timestamp: decode_ts(&raw_ts)?,
    })
}

const SALE_COLUMNS: [Sales; 9] = [
    Sales::Id,
    Sales::SalesmanId,
    Sales::CustomerName,
    Sales::CustomerNumber,
    Sales::Barcode,
    Sales::Qty,
    Sales::Amount,
    Sales::NetAmount,
    Sales::Timestamp,
];

#[async_trait]
impl SaleStore for SqliteSaleStore {
    async fn submit(&self, sale: NewSale, salesman_id: i64) -> Result<Sale> {
        let timestamp = Utc::now();

        let query = Query::insert()
            .into_table(Sales::Table)
            .columns([
                Sales::SalesmanId,
                Sales::CustomerName,
                Sales::CustomerNumber,
                Sales::Barcode,
                Sales::Qty,
                Sales::Amount,
                Sales::NetAmount,
                Sales::Timestamp,
            ])
            .values_panic([
                salesman_id.into(),
                sale.customer_name.as_str().into(),
                sale.customer_number.as_str().into(),
                sale.barcode.as_str().into(),
                sale.qty.into(),
                sale.amount.into(),
                sale.net_amount.into(),
                format_ts(timestamp).into(),
            ])
            .to_string(SqliteQueryBuilder);

        let id = sqlx::query(&query)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        Ok(Sale {
            id,
            salesman_id,
            customer_name: sale.customer_name,
            customer_number: sale.customer_number,
            barcode: sale.barcode,
            qty: sale.qty,
            amount: sale.amount,
            net_amount: sale.net_amount,
            timestamp,
        })
    }

    async fn by_salesman(&self, salesman_id: i64) -> Result<Vec<Sale>> {
        let query = Query::select()
            .columns(SALE_COLUMNS)
            .from(Sales::Table)
            .and_where(Expr::col(Sales::SalesmanId).eq(salesman_id))
            .order_by(Sales::Timestamp, Order::Desc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_sale).collect()
    }

    async fn all(&self) -> Result<Vec<Sale>> {
        let query = Query::select()
            .columns(SALE_COLUMNS)
            .from(Sales::Table)
            .order_by(Sales::Id, Order::Asc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_sale).collect()
    }

    async fn count_and_sum_since(
        &self,
        salesman_id: i64,
        since: DateTime<Utc>,
    ) -> Result<(i64, f64)> {
        let query = Query::select()
            .expr(Expr::col(Sales::Id).count())
            .expr(Expr::col(Sales::Amount).sum())
            .from(Sales::Table)
            .and_where(Expr::col(Sales::SalesmanId).eq(salesman_id))
            .and_where(Expr::col(Sales::Timestamp).gte(format_ts(since)))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_one(&self.pool).await?;

        let count: i64 = row.get(0);
        let sum: Option<f64> = row.get(1);
        Ok((count, sum.unwrap_or(0.0)))
    }

    async fn sum_amount(&self, salesman_id: i64, window: &TimeWindow) -> Result<f64> {
        // The statement holds Rc internals, so it must drop before the await.
        let sql = {
            let mut query = Query::select();
            query
                .expr(Expr::col(Sales::Amount).sum())
                .from(Sales::Table)
                .and_where(Expr::col(Sales::SalesmanId).eq(salesman_id));

            if let Some(start) = window.start {
                query.and_where(Expr::col(Sales::Timestamp).gte(format_ts(start)));
            }
            if let Some(end) = window.end {
                query.and_where(Expr::col(Sales::Timestamp).lte(format_ts(end)));
            }

            query.to_string(SqliteQueryBuilder)
        };

        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;

        let sum: Option<f64> = row.get(0);
        Ok(sum.unwrap_or(0.0))
    }

    async fn admin_rows(
        &self,
        filter: &SalesFilter,
        limit: Option<u64>,
    ) -> Result<Vec<AdminSaleRow>> {
        // Built in a sync helper so the non-Send statement never lives
        // across the await.
        let sql = admin_rows_sql(filter, limit);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let raw_ts: String = row.get("timestamp");
            result.push(AdminSaleRow {
                timestamp: decode_ts(&raw_ts)?,
                customer_name: row.get("customer_name"),
                customer_number: row.get("customer_number"),
                barcode: row.get("barcode"),
                qty: row.get("qty"),
                amount: row.get("amount"),
                salesman_name: row.get("salesman_name"),
                outlet: row.get("salesman_outlet"),
            });
        }

        Ok(result)
    }
}

fn admin_rows_sql(filter: &SalesFilter, limit: Option<u64>) -> String {
    let mut query = Query::select();
    query
        .column((Sales::Table, Sales::Timestamp))
        .column((Sales::Table, Sales::CustomerName))
        .column((Sales::Table, Sales::CustomerNumber))
        .column((Sales::Table, Sales::Barcode))
        .column((Sales::Table, Sales::Qty))
        .column((Sales::Table, Sales::Amount))
        .expr_as(
            Expr::col((Salesmen::Table, Salesmen::Name)),
            Alias::new("salesman_name"),
        )
        .expr_as(
            Expr::col((Salesmen::Table, Salesmen::Outlet)),
            Alias::new("salesman_outlet"),
        )
        .from(Sales::Table)
        .left_join(
            Salesmen::Table,
            Expr::col((Sales::Table, Sales::SalesmanId)).equals((Salesmen::Table, Salesmen::Id)),
        )
        .order_by((Sales::Table, Sales::Timestamp), Order::Desc);

    if let Some(from) = filter.from {
        let start = from.and_hms_opt(0, 0, 0).unwrap().and_utc();
        query.and_where(Expr::col((Sales::Table, Sales::Timestamp)).gte(format_ts(start)));
    }
    if let Some(to) = filter.to {
        let end = to.and_hms_opt(23, 59, 59).unwrap().and_utc();
        query.and_where(Expr::col((Sales::Table, Sales::Timestamp)).lte(format_ts(end)));
    }

    if let Some(term) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", term.to_lowercase());
        query.cond_where(
            Cond::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((Sales::Table, Sales::CustomerName))))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((Sales::Table, Sales::CustomerNumber))))
                        .like(pattern.clone()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((Sales::Table, Sales::Barcode))))
                        .like(pattern),
                ),
        );
    }

    if let Some(limit) = limit {
        query.limit(limit);
    }

    query.to_string(SqliteQueryBuilder)
}
