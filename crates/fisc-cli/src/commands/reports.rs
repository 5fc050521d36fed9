//! Balance and reconciliation report commands

use anyhow::Result;
use fisc_core::db::Database;
use fisc_core::AnalyticsEngine;

use super::truncate;

pub fn cmd_balance(db: &Database, user_id: i64, month: u32, year: i32) -> Result<()> {
    let balance = db.get_monthly_balance(user_id, month, year)?;

    println!();
    println!("💰 Monthly Balance - {:02}/{}", month, year);
    println!("   ─────────────────────────────");
    println!("   Income:       ${:>12.2}", balance.income);
    println!("   Expenses:     ${:>12.2}", balance.expenses);
    println!("   Balance:      ${:>12.2}", balance.balance);
    println!("   Savings rate: {:>12.1}%", balance.savings_rate);

    Ok(())
}

pub fn cmd_report_budget(db: &Database, user_id: i64, month: u32, year: i32) -> Result<()> {
    let engine = AnalyticsEngine::new(db);
    let report = engine.reconcile_budget(user_id, month, year)?;

    println!();
    println!("📊 Budget vs Actual - {:02}/{}", month, year);
    println!("   ─────────────────────────────────────────────────────────────");

    if report.rows.is_empty() {
        println!("   Nothing to compare: no plan and no spending this month.");
        return Ok(());
    }

    println!(
        "   {:14} │ {:20} │ {:>9} │ {:>9} │ {:>8} │ {:13}",
        "Category", "Subcategory", "Planned", "Actual", "%", "Status"
    );
    println!(
        "   ───────────────┼──────────────────────┼───────────┼───────────┼──────────┼──────────────"
    );

    for row in &report.rows {
        let pct = row
            .percentage
            .map(|p| format!("{:.1}", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {:14} │ {:20} │ {:>9.2} │ {:>9.2} │ {:>8} │ {:13}",
            truncate(&row.category, 14),
            truncate(&row.subcategory, 20),
            row.planned_amount,
            row.actual_amount,
            pct,
            row.status
        );
    }

    println!(
        "   ───────────────┴──────────────────────┴───────────┴───────────┴──────────┴──────────────"
    );
    println!(
        "   Planned: ${:.2}   Actual: ${:.2}   Difference: ${:+.2}",
        report.total_planned, report.total_actual, report.total_difference
    );

    Ok(())
}
