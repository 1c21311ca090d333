//! SQLite CatalogStore implementation.

use async_trait::async_trait;
use sea_query::{Expr, Query, SqliteQueryBuilder};
use sqlx::{Row, SqlitePool};

use crate::interfaces::{CatalogStore, Result};
use crate::model::{ActualSale, ActualSaleKey, Product, TraitConfig};
use crate::storage::schema::{ActualSales, Products, TraitConfigs};

/// SQLite implementation of CatalogStore.
pub struct SqliteCatalogStore {
    pool: SqlitePool,
}

impl SqliteCatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn find_actual_sale(&self, key: &ActualSaleKey) -> Result<Option<ActualSale>> {
        let query = Query::select()
            .columns([
                ActualSales::Id,
                ActualSales::Customer,
                ActualSales::Barcode,
                ActualSales::Qty,
                ActualSales::NetAmount,
            ])
            .from(ActualSales::Table)
            .and_where(Expr::col(ActualSales::Customer).eq(key.customer.as_str()))
            .and_where(Expr::col(ActualSales::Barcode).eq(key.barcode.as_str()))
            .and_where(Expr::col(ActualSales::Qty).eq(key.qty))
            .and_where(Expr::col(ActualSales::NetAmount).eq(key.net_amount))
            .limit(1)
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;

        Ok(row.map(|row| ActualSale {
            id: row.get("id"),
            customer: row.get("customer"),
            barcode: row.get("barcode"),
            qty: row.get("qty"),
            net_amount: row.get("net_amount"),
        }))
    }

    async fn product_by_barcode(&self, barcode: &str) -> Result<Option<Product>> {
        let query = Query::select()
            .columns([Products::Id, Products::Barcode, Products::Trait])
            .from(Products::Table)
            .and_where(Expr::col(Products::Barcode).eq(barcode))
            .limit(1)
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;

        Ok(row.map(|row| Product {
            id: row.get("id"),
            barcode: row.get("barcode"),
            trait_name: row.get("trait"),
        }))
    }

    async fn trait_config(&self, trait_name: &str) -> Result<Option<TraitConfig>> {
        let query = Query::select()
            .columns([
                TraitConfigs::Id,
                TraitConfigs::Trait,
                TraitConfigs::Percentage,
                TraitConfigs::IsVisible,
            ])
            .from(TraitConfigs::Table)
            .and_where(Expr::col(TraitConfigs::Trait).eq(trait_name))
            .limit(1)
            .to_string(SqliteQueryBuilder);

        let row = sqlx::query(&query).fetch_optional(&self.pool).await?;

        Ok(row.map(|row| TraitConfig {
            id: row.get("id"),
            trait_name: row.get("trait"),
            percentage: row.get("percentage"),
            is_visible: row.get("is_visible"),
        }))
    }
}
