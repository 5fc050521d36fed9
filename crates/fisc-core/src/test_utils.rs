//! Shared helpers for tests

use chrono::NaiveDate;

use crate::db::Database;
use crate::models::{NewExpense, NewIncome};

/// Parse a YYYY-MM-DD literal
pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid test date")
}

/// Register the standard test user and return its id
pub fn test_user(db: &Database) -> i64 {
    db.register_user("testuser", "testpass1", None)
        .expect("register test user")
}

/// Build a NewExpense from literals
pub fn expense(category: &str, subcategory: &str, amount: f64, date: &str) -> NewExpense {
    NewExpense {
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        amount,
        description: None,
        expense_date: d(date),
        tags: None,
    }
}

/// Build a NewIncome from literals
pub fn income(source: &str, amount: f64, date: &str) -> NewIncome {
    NewIncome {
        source: source.to_string(),
        amount,
        income_date: d(date),
        description: None,
    }
}
