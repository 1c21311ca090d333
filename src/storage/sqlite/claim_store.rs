//! SQLite ClaimStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Query, SqliteQueryBuilder};
use sqlx::{Row, SqlitePool};

use crate::interfaces::{ClaimStore, Result};
use crate::model::ClaimStatus;
use crate::storage::schema::Claims;

/// SQLite implementation of ClaimStore.
pub struct SqliteClaimStore {
    pool: SqlitePool,
}

impl SqliteClaimStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClaimStore for SqliteClaimStore {
    async fn sum_settled(&self, salesman_id: i64) -> Result<f64> {
        let query = Query::select()
            .expr(Expr::col(Claims::Amount).sum())
            .from(Claims::Table)
            .and_where(Expr::col(Claims::SalesmanId).eq(salesman_id))
            .and_where(
                Expr::col(Claims::Status)
                    .is_in(ClaimStatus::SETTLED.iter().map(|s| s.as_str())),
            )
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_one(&self.pool).await?;

        let sum: Option<f64> = row.get(0);
        Ok(sum.unwrap_or(0.0))
    }
}
