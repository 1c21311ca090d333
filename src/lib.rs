//! Spiff - Sales-Incentive Backend
//!
//! Salesmen submit sales, admins reconcile them against imported
//! ground-truth records, and per-product-trait percentage rules turn
//! verified sales into wallet credits. The accrual engine and the
//! reporting queries are the core; storage is a trait seam with a
//! SQLite implementation behind the `sqlite` feature.

pub mod config;
pub mod interfaces;
pub mod model;
pub mod services;
pub mod storage;
pub mod utils;
