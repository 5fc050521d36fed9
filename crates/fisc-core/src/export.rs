//! Export functionality for expenses and full user backups
//!
//! Supports:
//! - Expense CSV export with optional date filtering
//! - Full JSON backup export/restore covering expenses, income, and budgets

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::db::Database;
use crate::error::Result;
use crate::models::{NewExpense, NewIncome};

/// Backup format version; bump when the structure changes
const BACKUP_VERSION: &str = "1.0";

/// An expense row shaped for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseExport {
    pub category: String,
    pub subcategory: String,
    pub amount: f64,
    pub expense_date: String,
    pub description: Option<String>,
    pub tags: Option<String>,
}

/// An income row shaped for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeExport {
    pub source: String,
    pub amount: f64,
    pub income_date: String,
    pub description: Option<String>,
}

/// A budget plan row shaped for export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetExport {
    pub category: String,
    pub subcategory: String,
    pub planned_amount: f64,
    pub month: u32,
    pub year: i32,
}

/// Backup metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupMetadata {
    /// Backup format version
    pub version: String,
    /// When the backup was created
    pub created_at: String,
    /// Total number of records in the backup
    pub total_records: usize,
}

/// Full backup of one user's ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullBackup {
    pub metadata: BackupMetadata,
    pub expenses: Vec<ExpenseExport>,
    pub income: Vec<IncomeExport>,
    pub budgets: Vec<BudgetExport>,
}

/// Counts from a backup restore
#[derive(Debug, Clone, Default, Serialize)]
pub struct RestoreStats {
    pub expenses: usize,
    pub income: usize,
    pub budgets: usize,
    /// Rows dropped because they no longer validate (taxonomy changes,
    /// malformed dates)
    pub skipped: usize,
}

/// Export a user's expenses as CSV bytes
pub fn export_expenses_csv(
    db: &Database,
    user_id: i64,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Result<Vec<u8>> {
    let expenses = db.list_expenses(user_id, from, to)?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "date",
        "category",
        "subcategory",
        "amount",
        "description",
        "tags",
    ])?;

    for expense in &expenses {
        writer.write_record([
            expense.expense_date.to_string(),
            expense.category.clone(),
            expense.subcategory.clone(),
            format!("{:.2}", expense.amount),
            expense.description.clone().unwrap_or_default(),
            expense.tags.clone().unwrap_or_default(),
        ])?;
    }

    writer
        .into_inner()
        .map_err(|e| crate::error::Error::InvalidData(format!("CSV buffer error: {}", e)))
}

/// Build a full JSON-serializable backup of one user's ledger
pub fn export_backup(db: &Database, user_id: i64) -> Result<FullBackup> {
    let expenses: Vec<ExpenseExport> = db
        .list_expenses(user_id, None, None)?
        .into_iter()
        .map(|e| ExpenseExport {
            category: e.category,
            subcategory: e.subcategory,
            amount: e.amount,
            expense_date: e.expense_date.to_string(),
            description: e.description,
            tags: e.tags,
        })
        .collect();

    let income: Vec<IncomeExport> = db
        .list_income(user_id, None, None)?
        .into_iter()
        .map(|i| IncomeExport {
            source: i.source,
            amount: i.amount,
            income_date: i.income_date.to_string(),
            description: i.description,
        })
        .collect();

    let conn = db.conn()?;
    let mut stmt = conn.prepare(
        "SELECT category, subcategory, planned_amount, month, year
         FROM budget_plans WHERE user_id = ? ORDER BY year, month, category, subcategory",
    )?;
    let budgets: Vec<BudgetExport> = stmt
        .query_map(rusqlite::params![user_id], |row| {
            Ok(BudgetExport {
                category: row.get(0)?,
                subcategory: row.get(1)?,
                planned_amount: row.get(2)?,
                month: row.get(3)?,
                year: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let total_records = expenses.len() + income.len() + budgets.len();
    info!(user_id, total_records, "Built full backup");

    Ok(FullBackup {
        metadata: BackupMetadata {
            version: BACKUP_VERSION.to_string(),
            created_at: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            total_records,
        },
        expenses,
        income,
        budgets,
    })
}

/// Restore a backup into a user's ledger
///
/// Additive: restored rows are inserted alongside existing data, never
/// replacing it. Rows that fail validation are skipped and counted.
pub fn restore_backup(db: &Database, user_id: i64, backup: &FullBackup) -> Result<RestoreStats> {
    let mut stats = RestoreStats::default();

    for row in &backup.expenses {
        let date = match NaiveDate::parse_from_str(&row.expense_date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                warn!(date = %row.expense_date, "Skipping expense with bad date");
                stats.skipped += 1;
                continue;
            }
        };
        let new_expense = NewExpense {
            category: row.category.clone(),
            subcategory: row.subcategory.clone(),
            amount: row.amount,
            description: row.description.clone(),
            expense_date: date,
            tags: row.tags.clone(),
        };
        match db.add_expense(user_id, &new_expense) {
            Ok(_) => stats.expenses += 1,
            Err(e) => {
                warn!(error = %e, "Skipping expense from backup");
                stats.skipped += 1;
            }
        }
    }

    for row in &backup.income {
        let date = match NaiveDate::parse_from_str(&row.income_date, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                warn!(date = %row.income_date, "Skipping income with bad date");
                stats.skipped += 1;
                continue;
            }
        };
        let new_income = NewIncome {
            source: row.source.clone(),
            amount: row.amount,
            income_date: date,
            description: row.description.clone(),
        };
        match db.add_income(user_id, &new_income) {
            Ok(_) => stats.income += 1,
            Err(e) => {
                warn!(error = %e, "Skipping income from backup");
                stats.skipped += 1;
            }
        }
    }

    for row in &backup.budgets {
        match db.set_budget(
            user_id,
            &row.category,
            &row.subcategory,
            row.planned_amount,
            row.month,
            row.year,
        ) {
            Ok(_) => stats.budgets += 1,
            Err(e) => {
                warn!(error = %e, "Skipping budget entry from backup");
                stats.skipped += 1;
            }
        }
    }

    info!(
        user_id,
        expenses = stats.expenses,
        income = stats.income,
        budgets = stats.budgets,
        skipped = stats.skipped,
        "Backup restore complete"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, income, test_user};

    fn seeded_db() -> (Database, i64) {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        db.add_expense(user_id, &expense("Food", "Groceries", 52.3, "2026-03-02"))
            .unwrap();
        db.add_expense(
            user_id,
            &expense("Housing", "Electricity", 80.0, "2026-03-10"),
        )
        .unwrap();
        db.add_income(user_id, &income("Salary", 3000.0, "2026-03-01"))
            .unwrap();
        db.set_budget(user_id, "Food", "Groceries", 400.0, 3, 2026)
            .unwrap();
        (db, user_id)
    }

    #[test]
    fn test_csv_export() {
        let (db, user_id) = seeded_db();

        let bytes = export_expenses_csv(&db, user_id, None, None).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,category,subcategory,amount,description,tags"
        );
        assert!(text.contains("2026-03-02,Food,Groceries,52.30,,"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_backup_roundtrip() {
        let (db, user_id) = seeded_db();

        let backup = export_backup(&db, user_id).unwrap();
        assert_eq!(backup.metadata.total_records, 4);

        // Backups survive a JSON round trip
        let json = serde_json::to_string(&backup).unwrap();
        let parsed: FullBackup = serde_json::from_str(&json).unwrap();

        let fresh = db.register_user("restored", "secret99", None).unwrap();
        let stats = restore_backup(&db, fresh, &parsed).unwrap();

        assert_eq!(stats.expenses, 2);
        assert_eq!(stats.income, 1);
        assert_eq!(stats.budgets, 1);
        assert_eq!(stats.skipped, 0);
        assert_eq!(db.list_expenses(fresh, None, None).unwrap().len(), 2);
        assert_eq!(db.get_budget_plan(fresh, 3, 2026).unwrap().len(), 1);
    }

    #[test]
    fn test_restore_is_additive_and_skips_bad_rows() {
        let (db, user_id) = seeded_db();

        let mut backup = export_backup(&db, user_id).unwrap();
        backup.expenses.push(ExpenseExport {
            category: "Made Up".to_string(),
            subcategory: "Nothing".to_string(),
            amount: 10.0,
            expense_date: "2026-03-05".to_string(),
            description: None,
            tags: None,
        });
        backup.expenses.push(ExpenseExport {
            category: "Food".to_string(),
            subcategory: "Groceries".to_string(),
            amount: 10.0,
            expense_date: "not-a-date".to_string(),
            description: None,
            tags: None,
        });

        let stats = restore_backup(&db, user_id, &backup).unwrap();
        assert_eq!(stats.expenses, 2);
        assert_eq!(stats.skipped, 2);

        // Original two plus the two restored copies
        assert_eq!(db.list_expenses(user_id, None, None).unwrap().len(), 4);
    }
}
