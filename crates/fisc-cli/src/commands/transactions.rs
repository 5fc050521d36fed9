//! Expense and income commands

use anyhow::Result;
use chrono::NaiveDate;
use fisc_core::db::Database;
use fisc_core::models::{NewExpense, NewIncome};
use fisc_core::TAXONOMY;

use super::truncate;

#[allow(clippy::too_many_arguments)]
pub fn cmd_expense_add(
    db: &Database,
    user_id: i64,
    category: &str,
    subcategory: &str,
    amount: f64,
    date: NaiveDate,
    description: Option<&str>,
    tags: Option<&str>,
) -> Result<()> {
    let expense = NewExpense {
        category: category.to_string(),
        subcategory: subcategory.to_string(),
        amount,
        description: description.map(str::to_string),
        expense_date: date,
        tags: tags.map(str::to_string),
    };

    let id = db.add_expense(user_id, &expense)?;
    let icon = TAXONOMY
        .category_info(category)
        .map(|info| info.icon)
        .unwrap_or("📌");
    println!(
        "✅ Recorded expense #{}: {} {} / {} ${:.2} on {}",
        id, icon, category, subcategory, amount, date
    );
    Ok(())
}

pub fn cmd_expense_list(db: &Database, user_id: i64, month: u32, year: i32) -> Result<()> {
    let expenses = db.list_expenses_for_month(user_id, month, year)?;

    println!();
    println!("💸 Expenses - {:02}/{}", month, year);
    println!("   ─────────────────────────────────────────────────────────────");

    if expenses.is_empty() {
        println!("   No expenses recorded for this month.");
        return Ok(());
    }

    println!(
        "   {:>4} │ {:10} │ {:18} │ {:22} │ {:>10}",
        "Id", "Date", "Category", "Subcategory", "Amount"
    );
    println!("   ─────┼────────────┼────────────────────┼────────────────────────┼───────────");

    let mut total = 0.0;
    for expense in &expenses {
        total += expense.amount;
        println!(
            "   {:>4} │ {:10} │ {:18} │ {:22} │ {:>10.2}",
            expense.id,
            expense.expense_date.to_string(),
            truncate(&expense.category, 18),
            truncate(&expense.subcategory, 22),
            expense.amount
        );
    }

    println!("   ─────┴────────────┴────────────────────┴────────────────────────┴───────────");
    println!("   Total: ${:.2} across {} expense(s)", total, expenses.len());

    Ok(())
}

pub fn cmd_expense_delete(db: &Database, user_id: i64, expense_id: i64) -> Result<()> {
    db.delete_expense(user_id, expense_id)?;
    println!("🗑️  Deleted expense #{}", expense_id);
    Ok(())
}

pub fn cmd_income_add(
    db: &Database,
    user_id: i64,
    source: &str,
    amount: f64,
    date: NaiveDate,
    description: Option<&str>,
) -> Result<()> {
    let income = NewIncome {
        source: source.to_string(),
        amount,
        income_date: date,
        description: description.map(str::to_string),
    };

    let id = db.add_income(user_id, &income)?;
    println!(
        "✅ Recorded income #{}: {} ${:.2} on {}",
        id, source, amount, date
    );
    Ok(())
}

pub fn cmd_income_list(db: &Database, user_id: i64, month: u32, year: i32) -> Result<()> {
    let entries = db.list_income_for_month(user_id, month, year)?;

    println!();
    println!("💵 Income - {:02}/{}", month, year);
    println!("   ─────────────────────────────────────────────────────────────");

    if entries.is_empty() {
        println!("   No income recorded for this month.");
        return Ok(());
    }

    println!(
        "   {:>4} │ {:10} │ {:22} │ {:>10}",
        "Id", "Date", "Source", "Amount"
    );
    println!("   ─────┼────────────┼────────────────────────┼───────────");

    let mut total = 0.0;
    for entry in &entries {
        total += entry.amount;
        println!(
            "   {:>4} │ {:10} │ {:22} │ {:>10.2}",
            entry.id,
            entry.income_date.to_string(),
            truncate(&entry.source, 22),
            entry.amount
        );
    }

    println!("   ─────┴────────────┴────────────────────────┴───────────");
    println!("   Total: ${:.2} across {} entry(ies)", total, entries.len());

    Ok(())
}

pub fn cmd_income_delete(db: &Database, user_id: i64, income_id: i64) -> Result<()> {
    db.delete_income(user_id, income_id)?;
    println!("🗑️  Deleted income entry #{}", income_id);
    Ok(())
}
