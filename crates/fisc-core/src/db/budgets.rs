//! Budget plan upserts and period lookups

use rusqlite::params;
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{round_cents, BudgetEntry};
use crate::taxonomy::TAXONOMY;

impl Database {
    /// Set the planned amount for a (category, subcategory, month, year)
    ///
    /// Upserts on the unique plan key, so setting a budget twice updates the
    /// existing row in place.
    pub fn set_budget(
        &self,
        user_id: i64,
        category: &str,
        subcategory: &str,
        planned_amount: f64,
        month: u32,
        year: i32,
    ) -> Result<i64> {
        if !TAXONOMY.is_valid_expense(category, subcategory) {
            return Err(Error::InvalidCategory(format!(
                "{} / {}",
                category, subcategory
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!("Invalid month: {}", month)));
        }
        if planned_amount < 0.0 || !planned_amount.is_finite() {
            return Err(Error::InvalidData(
                "Planned amount must be zero or positive".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO budget_plans (user_id, category, subcategory, planned_amount, month, year)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id, category, subcategory, month, year)
             DO UPDATE SET planned_amount = excluded.planned_amount",
            params![
                user_id,
                category,
                subcategory,
                round_cents(planned_amount),
                month,
                year
            ],
        )?;

        let id: i64 = conn.query_row(
            "SELECT id FROM budget_plans
             WHERE user_id = ? AND category = ? AND subcategory = ? AND month = ? AND year = ?",
            params![user_id, category, subcategory, month, year],
            |row| row.get(0),
        )?;

        debug!(user_id, category, subcategory, month, year, "Set budget");
        Ok(id)
    }

    /// All budget plan entries for a user's month
    pub fn get_budget_plan(&self, user_id: i64, month: u32, year: i32) -> Result<Vec<BudgetEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, user_id, category, subcategory, planned_amount, month, year, created_at
             FROM budget_plans
             WHERE user_id = ? AND month = ? AND year = ?
             ORDER BY category, subcategory",
        )?;
        let rows = stmt.query_map(params![user_id, month, year], row_to_budget_entry)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Delete one budget plan entry owned by the user
    pub fn delete_budget(&self, user_id: i64, budget_id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM budget_plans WHERE id = ? AND user_id = ?",
            params![budget_id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Budget entry {}", budget_id)));
        }
        Ok(())
    }

    /// Copy a month's budget plan to the following month
    ///
    /// Existing entries in the target month keep their amounts (the copy
    /// skips them). Returns the number of entries copied.
    pub fn copy_budget_to_next_month(
        &self,
        user_id: i64,
        month: u32,
        year: i32,
    ) -> Result<usize> {
        let (next_month, next_year) = if month == 12 {
            (1, year + 1)
        } else {
            (month + 1, year)
        };

        let conn = self.conn()?;
        let copied = conn.execute(
            "INSERT INTO budget_plans (user_id, category, subcategory, planned_amount, month, year)
             SELECT user_id, category, subcategory, planned_amount, ?, ?
             FROM budget_plans
             WHERE user_id = ? AND month = ? AND year = ?
             ON CONFLICT(user_id, category, subcategory, month, year) DO NOTHING",
            params![next_month, next_year, user_id, month, year],
        )?;

        debug!(user_id, month, year, copied, "Copied budget to next month");
        Ok(copied)
    }
}

fn row_to_budget_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<BudgetEntry> {
    Ok(BudgetEntry {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        subcategory: row.get(3)?,
        planned_amount: row.get(4)?,
        month: row.get(5)?,
        year: row.get(6)?,
        created_at: parse_datetime(&row.get::<_, String>(7)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_user;

    #[test]
    fn test_set_budget_upserts() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        db.set_budget(user_id, "Food", "Groceries", 400.0, 3, 2026)
            .unwrap();
        db.set_budget(user_id, "Food", "Groceries", 450.0, 3, 2026)
            .unwrap();

        let plan = db.get_budget_plan(user_id, 3, 2026).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].planned_amount, 450.0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        assert!(matches!(
            db.set_budget(user_id, "Food", "Unknown", 100.0, 3, 2026),
            Err(Error::InvalidCategory(_))
        ));
        assert!(matches!(
            db.set_budget(user_id, "Food", "Groceries", 100.0, 13, 2026),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(
            db.set_budget(user_id, "Food", "Groceries", -5.0, 3, 2026),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_copy_to_next_month() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        db.set_budget(user_id, "Food", "Groceries", 400.0, 12, 2026)
            .unwrap();
        db.set_budget(user_id, "Housing", "Electricity", 120.0, 12, 2026)
            .unwrap();
        // The target month already has an entry that must survive the copy
        db.set_budget(user_id, "Food", "Groceries", 999.0, 1, 2027)
            .unwrap();

        let copied = db.copy_budget_to_next_month(user_id, 12, 2026).unwrap();
        assert_eq!(copied, 1);

        let january = db.get_budget_plan(user_id, 1, 2027).unwrap();
        assert_eq!(january.len(), 2);
        let groceries = january
            .iter()
            .find(|e| e.subcategory == "Groceries")
            .unwrap();
        assert_eq!(groceries.planned_amount, 999.0);
    }
}
