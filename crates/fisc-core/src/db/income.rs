//! Income CRUD and monthly balance

use chrono::NaiveDate;
use rusqlite::params;
use tracing::debug;

use super::{month_bounds, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{round_cents, Income, MonthlyBalance, NewIncome};
use crate::taxonomy::TAXONOMY;

impl Database {
    /// Record a new income entry
    ///
    /// The source label is validated against the taxonomy's income sources
    /// and the amount must be positive.
    pub fn add_income(&self, user_id: i64, income: &NewIncome) -> Result<i64> {
        if !TAXONOMY.is_valid_income_source(&income.source) {
            return Err(Error::InvalidCategory(income.source.clone()));
        }
        if income.amount <= 0.0 || !income.amount.is_finite() {
            return Err(Error::InvalidData(
                "Income amount must be positive".to_string(),
            ));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO income (user_id, source, amount, income_date, description)
             VALUES (?, ?, ?, ?, ?)",
            params![
                user_id,
                income.source,
                round_cents(income.amount),
                income.income_date.to_string(),
                income.description,
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(user_id, id, source = %income.source, "Recorded income");
        Ok(id)
    }

    /// List a user's income entries, optionally restricted to a date range
    pub fn list_income(
        &self,
        user_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Income>> {
        let conn = self.conn()?;

        let mut sql = String::from(
            "SELECT id, user_id, source, amount, income_date, description, created_at
             FROM income WHERE user_id = ?1",
        );
        if from.is_some() {
            sql.push_str(" AND income_date >= ?2");
        }
        if to.is_some() {
            sql.push_str(if from.is_some() {
                " AND income_date <= ?3"
            } else {
                " AND income_date <= ?2"
            });
        }
        sql.push_str(" ORDER BY income_date, id");

        let mut stmt = conn.prepare(&sql)?;
        let rows = match (from, to) {
            (Some(f), Some(t)) => {
                stmt.query_map(params![user_id, f.to_string(), t.to_string()], row_to_income)?
            }
            (Some(f), None) => stmt.query_map(params![user_id, f.to_string()], row_to_income)?,
            (None, Some(t)) => stmt.query_map(params![user_id, t.to_string()], row_to_income)?,
            (None, None) => stmt.query_map(params![user_id], row_to_income)?,
        };

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// List a user's income entries for one calendar month
    pub fn list_income_for_month(
        &self,
        user_id: i64,
        month: u32,
        year: i32,
    ) -> Result<Vec<Income>> {
        let (first, last) = month_bounds(year, month);
        self.list_income(user_id, Some(first), Some(last))
    }

    /// Delete an income entry owned by the user
    pub fn delete_income(&self, user_id: i64, income_id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM income WHERE id = ? AND user_id = ?",
            params![income_id, user_id],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Income entry {}", income_id)));
        }
        Ok(())
    }

    /// Total income amount for one calendar month
    pub fn total_income_for_month(&self, user_id: i64, month: u32, year: i32) -> Result<f64> {
        let (first, last) = month_bounds(year, month);
        let conn = self.conn()?;
        let total: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM income
             WHERE user_id = ? AND income_date BETWEEN ? AND ?",
            params![user_id, first.to_string(), last.to_string()],
            |row| row.get(0),
        )?;
        Ok(total)
    }

    /// Income, expenses, balance, and savings rate for one calendar month
    ///
    /// With no income the savings rate is reported as 0 rather than dividing
    /// by zero.
    pub fn get_monthly_balance(
        &self,
        user_id: i64,
        month: u32,
        year: i32,
    ) -> Result<MonthlyBalance> {
        let income = self.total_income_for_month(user_id, month, year)?;
        let expenses = self.total_expenses_for_month(user_id, month, year)?;
        let balance = income - expenses;
        let savings_rate = if income > 0.0 {
            balance / income * 100.0
        } else {
            0.0
        };

        Ok(MonthlyBalance {
            income,
            expenses,
            balance,
            savings_rate,
        })
    }
}

fn row_to_income(row: &rusqlite::Row<'_>) -> rusqlite::Result<Income> {
    let date_str: String = row.get(4)?;
    Ok(Income {
        id: row.get(0)?,
        user_id: row.get(1)?,
        source: row.get(2)?,
        amount: row.get(3)?,
        income_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
        })?,
        description: row.get(5)?,
        created_at: parse_datetime(&row.get::<_, String>(6)?),
    })
}
