//! Fisc Core Library
//!
//! Shared functionality for the Fisc household budget manager:
//! - Ledger database access and migrations (users, expenses, income, budgets)
//! - The fixed category taxonomy
//! - Budget analytics: reconciliation, forecasting, anomaly detection, and
//!   savings recommendations
//! - CSV export and full JSON backup/restore

pub mod analytics;
pub mod db;
pub mod error;
pub mod export;
pub mod models;
pub mod taxonomy;

/// Shared test helpers
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use analytics::{AnalyticsConfig, AnalyticsEngine};
pub use db::Database;
pub use error::{Error, Result};
pub use export::{export_backup, export_expenses_csv, restore_backup, FullBackup, RestoreStats};
pub use taxonomy::{Taxonomy, TAXONOMY};
