//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Init/categories commands and shared utilities (open_db)
//! - `users` - User registration and listing
//! - `transactions` - Expense and income commands
//! - `budgets` - Budget plan commands
//! - `reports` - Balance and reconciliation report commands
//! - `insights` - Forecast, anomaly, and recommendation commands
//! - `export` - CSV/JSON export and backup restore commands
//! - `serve` - Web server command

pub mod budgets;
pub mod core;
pub mod export;
pub mod insights;
pub mod reports;
pub mod serve;
pub mod transactions;
pub mod users;

// Re-export command functions for main.rs
pub use budgets::*;
pub use core::*;
pub use export::*;
pub use insights::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;
pub use users::*;

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate, Utc};
use fisc_core::db::Database;
use fisc_core::models::User;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}

/// Resolve the acting user from the global --user flag
pub fn resolve_user(db: &Database, username: Option<&str>) -> Result<User> {
    let username = match username {
        Some(name) => name,
        None => bail!("No user selected. Pass --user <username> (see 'fisc user list')"),
    };
    match db.find_user(username)? {
        Some(user) => Ok(user),
        None => bail!(
            "Unknown user '{}'. Register one with: fisc user register {}",
            username,
            username
        ),
    }
}

/// Fill in the current month/year for omitted period arguments
pub fn resolve_month(month: Option<u32>, year: Option<i32>) -> Result<(u32, i32)> {
    let today = Utc::now().date_naive();
    let month = month.unwrap_or_else(|| today.month());
    let year = year.unwrap_or_else(|| today.year());
    if !(1..=12).contains(&month) {
        bail!("Month must be between 1 and 12, got {}", month);
    }
    Ok((month, year))
}

/// Parse an optional YYYY-MM-DD argument, defaulting to today
pub fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .context("Invalid date format (use YYYY-MM-DD)"),
        None => Ok(Utc::now().date_naive()),
    }
}
