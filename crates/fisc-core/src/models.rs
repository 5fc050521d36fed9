//! Domain models for Fisc

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC hash string; never serialized to API responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

/// A recorded expense transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub subcategory: String,
    /// Always positive; expenses and income are separate records
    pub amount: f64,
    pub description: Option<String>,
    pub expense_date: NaiveDate,
    /// Comma-separated free-form tags
    pub tags: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new expense to be recorded (before DB insertion)
#[derive(Debug, Clone, Deserialize)]
pub struct NewExpense {
    pub category: String,
    pub subcategory: String,
    pub amount: f64,
    pub description: Option<String>,
    pub expense_date: NaiveDate,
    pub tags: Option<String>,
}

/// A recorded income entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub id: i64,
    pub user_id: i64,
    /// Flat source label from the taxonomy (no subcategories)
    pub source: String,
    pub amount: f64,
    pub income_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A new income entry to be recorded
#[derive(Debug, Clone, Deserialize)]
pub struct NewIncome {
    pub source: String,
    pub amount: f64,
    pub income_date: NaiveDate,
    pub description: Option<String>,
}

/// One planned-spend entry: intended spending for a subcategory in a period
///
/// Unique per (user, category, subcategory, month, year); `set_budget`
/// upserts on that key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub id: i64,
    pub user_id: i64,
    pub category: String,
    pub subcategory: String,
    pub planned_amount: f64,
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

/// Income/expense balance for one month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBalance {
    pub income: f64,
    pub expenses: f64,
    pub balance: f64,
    /// (income - expenses) / income * 100, or 0 when there is no income
    pub savings_rate: f64,
}

/// Round a monetary amount to cents
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Round a percentage to one decimal place
pub fn round_percent(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.345), 12.35);
        assert_eq!(round_cents(12.344), 12.34);
        assert_eq!(round_cents(0.0), 0.0);
    }

    #[test]
    fn test_round_percent() {
        assert_eq!(round_percent(109.999), 110.0);
        assert_eq!(round_percent(89.94), 89.9);
        assert_eq!(round_percent(110.06), 110.1);
    }
}
