//! Database schema definitions using sea-query.
//!
//! These define the table and column identifiers for type-safe query
//! building. Timestamps are TEXT in the canonical RFC 3339 form (see
//! `utils::time`), booleans are INTEGER.

use sea_query::Iden;

/// Salesmen table schema.
#[derive(Iden)]
pub enum Salesmen {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "name"]
    Name,
    #[iden = "mobile"]
    Mobile,
    #[iden = "outlet"]
    Outlet,
    #[iden = "vertical"]
    Vertical,
    #[iden = "is_approved"]
    IsApproved,
    #[iden = "wallet_balance"]
    WalletBalance,
}

/// Sales table schema.
#[derive(Iden)]
pub enum Sales {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "salesman_id"]
    SalesmanId,
    #[iden = "customer_name"]
    CustomerName,
    #[iden = "customer_number"]
    CustomerNumber,
    #[iden = "barcode"]
    Barcode,
    #[iden = "qty"]
    Qty,
    #[iden = "amount"]
    Amount,
    #[iden = "net_amount"]
    NetAmount,
    #[iden = "timestamp"]
    Timestamp,
}

/// Actual sales (imported ground truth) table schema.
#[derive(Iden)]
pub enum ActualSales {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "customer"]
    Customer,
    #[iden = "barcode"]
    Barcode,
    #[iden = "qty"]
    Qty,
    #[iden = "net_amount"]
    NetAmount,
}

/// Products table schema.
#[derive(Iden)]
pub enum Products {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "barcode"]
    Barcode,
    #[iden = "trait"]
    Trait,
}

/// Trait configuration table schema.
#[derive(Iden)]
pub enum TraitConfigs {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "trait"]
    Trait,
    #[iden = "percentage"]
    Percentage,
    #[iden = "is_visible"]
    IsVisible,
}

/// Incentives table schema.
#[derive(Iden)]
pub enum Incentives {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "salesman_id"]
    SalesmanId,
    #[iden = "barcode"]
    Barcode,
    #[iden = "trait"]
    Trait,
    #[iden = "amount"]
    Amount,
    #[iden = "is_visible"]
    IsVisible,
    #[iden = "timestamp"]
    Timestamp,
}

/// Claims table schema.
#[derive(Iden)]
pub enum Claims {
    Table,
    #[iden = "id"]
    Id,
    #[iden = "salesman_id"]
    SalesmanId,
    #[iden = "amount"]
    Amount,
    #[iden = "status"]
    Status,
    #[iden = "timestamp"]
    Timestamp,
}
