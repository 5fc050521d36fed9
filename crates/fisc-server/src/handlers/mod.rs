//! Request handlers, organized by domain

mod auth;
mod budgets;
mod expenses;
mod export;
mod income;
mod insights;

pub use auth::*;
pub use budgets::*;
pub use expenses::*;
pub use export::*;
pub use income::*;
pub use insights::*;

use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::AppError;

/// Month/year query parameters, defaulting to the current month
#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl PeriodQuery {
    /// Resolve to a concrete (month, year), validating the month range
    pub fn resolve(&self) -> Result<(u32, i32), AppError> {
        let today = Utc::now().date_naive();
        let month = self.month.unwrap_or_else(|| today.month());
        let year = self.year.unwrap_or_else(|| today.year());
        if !(1..=12).contains(&month) {
            return Err(AppError::bad_request("Month must be between 1 and 12"));
        }
        Ok((month, year))
    }
}
