//! Expense aggregation
//!
//! Groups raw expense records two ways: by (category, subcategory) for
//! single-period summaries, and by (category, month) for the multi-month
//! series the forecaster consumes. Pure functions of their input.

use chrono::Datelike;
use std::collections::BTreeMap;

use crate::models::Expense;

use super::types::{CategorySpend, MonthlyPoint};

/// Sum, count, and mean per (category, subcategory) group
///
/// Groups with no transactions simply do not appear, so there is never a
/// zero-count division.
pub fn summarize_by_subcategory(expenses: &[Expense]) -> Vec<CategorySpend> {
    let mut groups: BTreeMap<(String, String), (f64, usize)> = BTreeMap::new();

    for expense in expenses {
        let entry = groups
            .entry((expense.category.clone(), expense.subcategory.clone()))
            .or_insert((0.0, 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|((category, subcategory), (total, count))| CategorySpend {
            category,
            subcategory,
            total,
            count,
            mean: total / count as f64,
        })
        .collect()
}

/// Per-category monthly spend series, months sorted ascending
pub fn monthly_series(expenses: &[Expense]) -> BTreeMap<String, Vec<MonthlyPoint>> {
    let mut groups: BTreeMap<String, BTreeMap<(i32, u32), f64>> = BTreeMap::new();

    for expense in expenses {
        let key = (expense.expense_date.year(), expense.expense_date.month());
        *groups
            .entry(expense.category.clone())
            .or_default()
            .entry(key)
            .or_insert(0.0) += expense.amount;
    }

    groups
        .into_iter()
        .map(|(category, months)| {
            let series = months
                .into_iter()
                .map(|((year, month), total)| MonthlyPoint { year, month, total })
                .collect();
            (category, series)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::test_utils::{expense, test_user};

    fn sample_expenses(db: &Database, user_id: i64) -> Vec<Expense> {
        for (cat, sub, amount, date) in [
            ("Food", "Groceries", 100.0, "2026-01-05"),
            ("Food", "Groceries", 50.0, "2026-01-20"),
            ("Food", "Dining Out & Catering", 40.0, "2026-02-02"),
            ("Housing", "Electricity", 90.0, "2026-02-10"),
        ] {
            db.add_expense(user_id, &expense(cat, sub, amount, date))
                .unwrap();
        }
        db.list_expenses(user_id, None, None).unwrap()
    }

    #[test]
    fn test_summarize_by_subcategory() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);
        let expenses = sample_expenses(&db, user_id);

        let summary = summarize_by_subcategory(&expenses);
        assert_eq!(summary.len(), 3);

        let groceries = summary
            .iter()
            .find(|g| g.subcategory == "Groceries")
            .unwrap();
        assert_eq!(groceries.total, 150.0);
        assert_eq!(groceries.count, 2);
        assert_eq!(groceries.mean, 75.0);
    }

    #[test]
    fn test_summarize_empty_input() {
        assert!(summarize_by_subcategory(&[]).is_empty());
        assert!(monthly_series(&[]).is_empty());
    }

    #[test]
    fn test_monthly_series_sorted() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);
        let expenses = sample_expenses(&db, user_id);

        let series = monthly_series(&expenses);
        assert_eq!(series.len(), 2);

        let food = &series["Food"];
        assert_eq!(food.len(), 2);
        assert_eq!((food[0].year, food[0].month), (2026, 1));
        assert_eq!(food[0].total, 150.0);
        assert_eq!((food[1].year, food[1].month), (2026, 2));
        assert_eq!(food[1].total, 40.0);
    }
}
