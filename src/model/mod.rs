//! Domain records and view records.
//!
//! These are plain data carriers: storage rows come in, aggregate views go
//! out. No storage handle or connection ever crosses this boundary.

mod catalog;
mod claim;
mod incentive;
mod period;
mod sale;
mod salesman;
mod views;

pub use catalog::{ActualSale, ActualSaleKey, Product, TraitConfig};
pub use claim::{Claim, ClaimStatus};
pub use incentive::{Accrual, AccrualReport, Incentive, IncentiveView};
pub use period::Period;
pub use sale::{NewSale, Sale};
pub use salesman::Salesman;
pub use views::{AdminSaleRow, SalesFilter, SalesmanStats, SalesmanSummary, UNKNOWN_LABEL};
