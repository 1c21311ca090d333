//! SQLite storage implementations.
//!
//! Queries are built with sea-query and rendered for the SQLite dialect;
//! all writes that must be atomic go through an explicit
//! BEGIN IMMEDIATE / COMMIT / ROLLBACK bracket on a single pooled
//! connection.

mod catalog_store;
mod claim_store;
mod incentive_store;
mod sale_store;
mod salesman_store;

pub use catalog_store::SqliteCatalogStore;
pub use claim_store::SqliteClaimStore;
pub use incentive_store::SqliteIncentiveStore;
pub use sale_store::SqliteSaleStore;
pub use salesman_store::SqliteSalesmanStore;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::interfaces::{Result, StorageError};

/// Create all tables and indexes if they do not exist.
///
/// The UNIQUE index on incentives(salesman_id, barcode, trait) is the
/// dedup key: a conflicting insert is the idempotent skip case, and it
/// closes the check-then-insert race between concurrent accrual runs.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    const DDL: &[&str] = &[
        "CREATE TABLE IF NOT EXISTS salesmen (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            mobile TEXT NOT NULL,
            outlet TEXT NOT NULL,
            vertical TEXT NOT NULL,
            is_approved INTEGER NOT NULL DEFAULT 0,
            wallet_balance REAL NOT NULL DEFAULT 0
        )",
        "CREATE TABLE IF NOT EXISTS sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            salesman_id INTEGER NOT NULL,
            customer_name TEXT NOT NULL,
            customer_number TEXT NOT NULL,
            barcode TEXT NOT NULL,
            qty INTEGER NOT NULL,
            amount REAL NOT NULL,
            net_amount REAL NOT NULL,
            timestamp TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_sales_salesman_ts
            ON sales(salesman_id, timestamp)",
        "CREATE TABLE IF NOT EXISTS actual_sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer TEXT NOT NULL,
            barcode TEXT NOT NULL,
            qty INTEGER NOT NULL,
            net_amount REAL NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_actual_sales_key
            ON actual_sales(customer, barcode, qty, net_amount)",
        "CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            barcode TEXT NOT NULL UNIQUE,
            \"trait\" TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS trait_configs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            \"trait\" TEXT NOT NULL UNIQUE,
            percentage REAL NOT NULL,
            is_visible INTEGER NOT NULL DEFAULT 1
        )",
        "CREATE TABLE IF NOT EXISTS incentives (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            salesman_id INTEGER NOT NULL,
            barcode TEXT NOT NULL,
            \"trait\" TEXT NOT NULL,
            amount REAL NOT NULL,
            is_visible INTEGER NOT NULL DEFAULT 1,
            timestamp TEXT NOT NULL,
            UNIQUE (salesman_id, barcode, \"trait\")
        )",
        "CREATE TABLE IF NOT EXISTS claims (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            salesman_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            status TEXT NOT NULL,
            timestamp TEXT NOT NULL
        )",
    ];

    for ddl in DDL {
        sqlx::query(ddl).execute(pool).await?;
    }

    Ok(())
}

/// Decode a stored timestamp, surfacing corrupt rows as a typed error.
pub(crate) fn decode_ts(raw: &str) -> Result<DateTime<Utc>> {
    crate::utils::time::parse_ts(raw)
        .map_err(|e| StorageError::InvalidTimestamp(format!("{raw}: {e}")))
}
