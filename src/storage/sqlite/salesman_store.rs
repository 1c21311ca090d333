//! SQLite SalesmanStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Order, Query, SqliteQueryBuilder};
use sqlx::{Row, SqlitePool};

use crate::interfaces::{Result, SalesmanStore, StorageError};
use crate::model::Salesman;
use crate::storage::schema::Salesmen;

/// SQLite implementation of SalesmanStore.
pub struct SqliteSalesmanStore {
    pool: SqlitePool,
}

impl SqliteSalesmanStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_salesman(row: &sqlx::sqlite::SqliteRow) -> Salesman {
    Salesman {
        id: row.get("id"),
        name: row.get("name"),
        mobile: row.get("mobile"),
        outlet: row.get("outlet"),
        vertical: row.get("vertical"),
        is_approved: row.get("is_approved"),
        wallet_balance: row.get("wallet_balance"),
    }
}

#[async_trait]
impl SalesmanStore for SqliteSalesmanStore {
    async fn get(&self, salesman_id: i64) -> Result<Option<Salesman>> {
        let query = Query::select()
            .columns([
                Salesmen::Id,
                Salesmen::Name,
                Salesmen::Mobile,
                Salesmen::Outlet,
                Salesmen::Vertical,
                Salesmen::IsApproved,
                Salesmen::WalletBalance,
            ])
            .from(Salesmen::Table)
            .and_where(Expr::col(Salesmen::Id).eq(salesman_id))
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;

        Ok(row.map(|row| row_to_salesman(&row)))
    }

    async fn approved(&self) -> Result<Vec<Salesman>> {
        let query = Query::select()
            .columns([
                Salesmen::Id,
                Salesmen::Name,
                Salesmen::Mobile,
                Salesmen::Outlet,
                Salesmen::Vertical,
                Salesmen::IsApproved,
                Salesmen::WalletBalance,
            ])
            .from(Salesmen::Table)
            .and_where(Expr::col(Salesmen::IsApproved).eq(true))
            .order_by(Salesmen::Id, Order::Asc)
            .to_string(SqliteQueryBuilder);

        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(row_to_salesman).collect())
    }

    async fn remove(&self, salesman_id: i64) -> Result<()> {
        let query = Query::delete()
            .from_table(Salesmen::Table)
            .and_where(Expr::col(Salesmen::Id).eq(salesman_id))
            .and_where(Expr::col(Salesmen::IsApproved).eq(true))
            .to_string(SqliteQueryBuilder);

        let affected = sqlx::query(&query).execute(&self.pool).await?.rows_affected();

        if affected == 0 {
            return Err(StorageError::NotFound {
                entity: "salesman",
                id: salesman_id,
            });
        }

        Ok(())
    }
}
