//! Core services: the accrual engine and the reporting queries.

mod accrual;
mod export;
mod incentives;
mod reporting;

pub use accrual::AccrualEngine;
pub use export::{sales_workbook, ExportError};
pub use incentives::IncentiveService;
pub use reporting::{ReportingService, ADMIN_SALES_LIMIT};
