//! CLI command tests
//!
//! These drive the command functions directly against scratch databases;
//! argument parsing is covered by clap's derive validation.

use crate::commands;
use fisc_core::db::Database;
use fisc_core::test_utils::{expense, income};

fn scratch_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fisc.db");
    let db = Database::new(path.to_str().unwrap()).unwrap();
    (dir, db)
}

fn seeded_user(db: &Database) -> i64 {
    let user_id = db.register_user("cli-test", "secret99", None).unwrap();
    db.add_income(user_id, &income("Salary", 3000.0, "2026-03-01"))
        .unwrap();
    db.add_expense(user_id, &expense("Food", "Groceries", 420.0, "2026-03-05"))
        .unwrap();
    db.set_budget(user_id, "Food", "Groceries", 300.0, 3, 2026)
        .unwrap();
    user_id
}

#[test]
fn test_resolve_user() {
    let (_dir, db) = scratch_db();
    db.register_user("alice", "secret99", None).unwrap();

    let user = commands::resolve_user(&db, Some("alice")).unwrap();
    assert_eq!(user.username, "alice");

    assert!(commands::resolve_user(&db, Some("nobody")).is_err());
    assert!(commands::resolve_user(&db, None).is_err());
}

#[test]
fn test_resolve_month_validates_range() {
    assert!(commands::resolve_month(Some(13), Some(2026)).is_err());
    assert_eq!(
        commands::resolve_month(Some(4), Some(2026)).unwrap(),
        (4, 2026)
    );
    // Defaults come from the clock but must still be a valid period
    let (month, _year) = commands::resolve_month(None, None).unwrap();
    assert!((1..=12).contains(&month));
}

#[test]
fn test_resolve_date() {
    let date = commands::resolve_date(Some("2026-03-05")).unwrap();
    assert_eq!(date.to_string(), "2026-03-05");
    assert!(commands::resolve_date(Some("03/05/2026")).is_err());
    commands::resolve_date(None).unwrap();
}

#[test]
fn test_expense_commands_roundtrip() {
    let (_dir, db) = scratch_db();
    let user_id = db.register_user("alice", "secret99", None).unwrap();

    commands::cmd_expense_add(
        &db,
        user_id,
        "Food",
        "Groceries",
        42.5,
        commands::resolve_date(Some("2026-03-05")).unwrap(),
        Some("weekly shop"),
        None,
    )
    .unwrap();

    let expenses = db.list_expenses(user_id, None, None).unwrap();
    assert_eq!(expenses.len(), 1);

    commands::cmd_expense_list(&db, user_id, 3, 2026).unwrap();
    commands::cmd_expense_delete(&db, user_id, expenses[0].id).unwrap();
    assert!(db.list_expenses(user_id, None, None).unwrap().is_empty());

    // Unknown subcategory surfaces the core validation error
    assert!(commands::cmd_expense_add(
        &db,
        user_id,
        "Food",
        "Rockets",
        10.0,
        commands::resolve_date(Some("2026-03-05")).unwrap(),
        None,
        None,
    )
    .is_err());
}

#[test]
fn test_report_and_insight_commands_run() {
    let (_dir, db) = scratch_db();
    let user_id = seeded_user(&db);

    commands::cmd_balance(&db, user_id, 3, 2026).unwrap();
    commands::cmd_report_budget(&db, user_id, 3, 2026).unwrap();
    commands::cmd_insights_forecast(&db, user_id).unwrap();
    commands::cmd_insights_anomalies(&db, user_id).unwrap();
    commands::cmd_insights_recommend(&db, user_id, 3, 2026).unwrap();
    commands::cmd_budget_show(&db, user_id, 3, 2026).unwrap();
    commands::cmd_user_list(&db).unwrap();
    commands::cmd_categories().unwrap();
}

#[test]
fn test_budget_copy_command() {
    let (_dir, db) = scratch_db();
    let user_id = seeded_user(&db);

    commands::cmd_budget_copy(&db, user_id, 3, 2026).unwrap();
    assert_eq!(db.get_budget_plan(user_id, 4, 2026).unwrap().len(), 1);
}

#[test]
fn test_export_commands_write_files() {
    let (dir, db) = scratch_db();
    let user_id = seeded_user(&db);

    let csv_path = dir.path().join("expenses.csv");
    commands::cmd_export_transactions(&db, user_id, Some(&csv_path), None, None).unwrap();
    let csv = std::fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("date,category,subcategory"));
    assert!(csv.contains("Groceries"));

    let backup_path = dir.path().join("backup.json");
    commands::cmd_export_full(&db, user_id, &backup_path).unwrap();

    // Restoring into a second user reproduces the records
    let other = db.register_user("restored", "secret99", None).unwrap();
    commands::cmd_import_full(&db, other, &backup_path).unwrap();
    assert_eq!(db.list_expenses(other, None, None).unwrap().len(), 1);
    assert_eq!(db.list_income(other, None, None).unwrap().len(), 1);
}
