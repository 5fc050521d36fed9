//! Budget plan commands

use anyhow::Result;
use fisc_core::db::Database;

use super::truncate;

#[allow(clippy::too_many_arguments)]
pub fn cmd_budget_set(
    db: &Database,
    user_id: i64,
    category: &str,
    subcategory: &str,
    amount: f64,
    month: u32,
    year: i32,
) -> Result<()> {
    db.set_budget(user_id, category, subcategory, amount, month, year)?;
    println!(
        "✅ Budget set: {} / {} ${:.2} for {:02}/{}",
        category, subcategory, amount, month, year
    );
    Ok(())
}

pub fn cmd_budget_show(db: &Database, user_id: i64, month: u32, year: i32) -> Result<()> {
    let plan = db.get_budget_plan(user_id, month, year)?;

    println!();
    println!("📋 Budget Plan - {:02}/{}", month, year);
    println!("   ─────────────────────────────────────────────────────────────");

    if plan.is_empty() {
        println!("   No budget set for this month. Use 'fisc budget set' to start.");
        return Ok(());
    }

    println!(
        "   {:18} │ {:24} │ {:>10}",
        "Category", "Subcategory", "Planned"
    );
    println!("   ───────────────────┼──────────────────────────┼───────────");

    let mut total = 0.0;
    for entry in &plan {
        total += entry.planned_amount;
        println!(
            "   {:18} │ {:24} │ {:>10.2}",
            truncate(&entry.category, 18),
            truncate(&entry.subcategory, 24),
            entry.planned_amount
        );
    }

    println!("   ───────────────────┴──────────────────────────┴───────────");
    println!("   Total planned: ${:.2}", total);

    Ok(())
}

pub fn cmd_budget_copy(db: &Database, user_id: i64, month: u32, year: i32) -> Result<()> {
    let copied = db.copy_budget_to_next_month(user_id, month, year)?;
    let (next_month, next_year) = if month == 12 {
        (1, year + 1)
    } else {
        (month + 1, year)
    };

    if copied == 0 {
        println!(
            "Nothing to copy: {:02}/{} has no entries missing from {:02}/{}",
            month, year, next_month, next_year
        );
    } else {
        println!(
            "✅ Copied {} budget entr{} from {:02}/{} to {:02}/{}",
            copied,
            if copied == 1 { "y" } else { "ies" },
            month,
            year,
            next_month,
            next_year
        );
    }
    Ok(())
}
