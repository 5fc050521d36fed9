//! Expense CRUD and period queries

use chrono::NaiveDate;
use rusqlite::params;
use tracing::debug;

use super::{month_bounds, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{round_cents, Expense, NewExpense};
use crate::taxonomy::TAXONOMY;

impl Database {
    /// Record a new expense
    ///
    /// The (category, subcategory) pair is validated against the taxonomy
    /// and the amount must be positive.
    pub fn add_expense(&self, user_id: i64, expense: &NewExpense) -> Result<i64> {
        if !TAXONOMY.is_valid_expense(&expense.category, &expense.subcategory) {
            return Err(Error::InvalidCategory(format!(
                "{} / {}",
                expense.category, expense.subcategory
            )));
        }
        if expense.amount <= 0.0 || !expense.amount.is_finite() {
            return Err(Error::InvalidData(
                "Expense amount must be positive".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (user_id, category, subcategory, amount, description, expense_date, tags)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                user_id,
                expense.category,
                expense.subcategory,
                round_cents(expense.amount),
                expense.description,
                expense.expense_date.to_string(),
                expense.tags,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(
            user_id,
            id,
            category = %expense.category,
            amount = expense.amount,
            "Recorded expense"
        );
        Ok(id)
    }

    /// List a user's expenses, optionally restricted to a date range
    ///
    /// Ordered by date ascending, then id, so repeated calls over the same
    /// snapshot return identical output.
    pub fn list_expenses(
        &self,
        user_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut sql = String::from(
            "SELECT id, user_id, category, subcategory, amount, description, expense_date, tags, created_at
             FROM expenses WHERE user_id = ?1",
        );
        if from.is_some() {
            sql.push_str(" AND expense_date >= ?2");
        }
        if to.is_some() {
            sql.push_str(if from.is_some() {
                " AND expense_date <= ?3"
            } else {
                " AND expense_date <= ?2"
            });
        }
        sql.push_str(" ORDER BY expense_date, id");

        let mut stmt = conn.prepare(&sql)?;
        let rows = match (from, to) {
            (Some(f), Some(t)) => stmt.query_map(
                params![user_id, f.to_string(), t.to_string()],
                row_to_expense,
            )?,
            (Some(f), None) => stmt.query_map(params![user_id, f.to_string()], row_to_expense)?,
            (None, Some(t)) => stmt.query_map(params![user_id, t.to_string()], row_to_expense)?,
            (None, None) => stmt.query_map(params![user_id], row_to_expense)?,
        };

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// List a user's expenses for one calendar month
    pub fn list_expenses_for_month(
        &self,
        user_id: i64,
        month: u32,
        year: i32,
    ) -> Result<Vec<Expense>> {
        let (first, last) = month_bounds(year, month);
        self.list_expenses(user_id, Some(first), Some(last))
    }

    /// Delete an expense owned by the user
    pub fn delete_expense(&self, user_id: i64, expense_id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM expenses WHERE id = ? AND user_id = ?",
            params![expense_id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Expense {}", expense_id)));
        }
        Ok(())
    }

    /// Total expense amount for one calendar month
    pub fn total_expenses_for_month(&self, user_id: i64, month: u32, year: i32) -> Result<f64> {
        let (first, last) = month_bounds(year, month);
        let conn = self.conn()?;
        let total: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses
             WHERE user_id = ? AND expense_date BETWEEN ? AND ?",
            params![user_id, first.to_string(), last.to_string()],
            |row| row.get(0),
        )?;
        Ok(total)
    }
}

fn row_to_expense(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    let date_str: String = row.get(6)?;
    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category: row.get(2)?,
        subcategory: row.get(3)?,
        amount: row.get(4)?,
        description: row.get(5)?,
        expense_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?,
        tags: row.get(7)?,
        created_at: parse_datetime(&row.get::<_, String>(8)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, test_user};

    #[test]
    fn test_add_and_list() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        db.add_expense(user_id, &expense("Food", "Groceries", 52.30, "2026-03-02"))
            .unwrap();
        db.add_expense(user_id, &expense("Housing", "Electricity", 80.0, "2026-03-10"))
            .unwrap();

        let all = db.list_expenses(user_id, None, None).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].category, "Food");

        let march = db.list_expenses_for_month(user_id, 3, 2026).unwrap();
        assert_eq!(march.len(), 2);
        let april = db.list_expenses_for_month(user_id, 4, 2026).unwrap();
        assert!(april.is_empty());
    }

    #[test]
    fn test_invalid_category_rejected() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let err = db
            .add_expense(user_id, &expense("Food", "Rocket Fuel", 10.0, "2026-03-02"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCategory(_)));

        let err = db
            .add_expense(user_id, &expense("Nonsense", "Groceries", 10.0, "2026-03-02"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidCategory(_)));
    }

    #[test]
    fn test_nonpositive_amount_rejected() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let err = db
            .add_expense(user_id, &expense("Food", "Groceries", 0.0, "2026-03-02"))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_delete_scoped_to_owner() {
        let db = Database::in_memory().unwrap();
        let alice = test_user(&db);
        let bob = db.register_user("bob", "secret99", None).unwrap();

        let id = db
            .add_expense(alice, &expense("Food", "Groceries", 25.0, "2026-03-02"))
            .unwrap();

        // Bob cannot delete Alice's expense
        assert!(matches!(
            db.delete_expense(bob, id),
            Err(Error::NotFound(_))
        ));
        db.delete_expense(alice, id).unwrap();
        assert!(db.list_expenses(alice, None, None).unwrap().is_empty());
    }
}
