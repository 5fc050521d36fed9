//! Budget reconciliation
//!
//! Joins a period's budget plan against actual spend and classifies each
//! (category, subcategory) row by how close the actual came to the plan.

use std::collections::BTreeMap;

use crate::models::{round_percent, BudgetEntry, Expense};

use super::types::{BudgetComparison, BudgetStatus, ComparisonRow};
use super::{summarize_by_subcategory, AnalyticsConfig};

/// Compare a budget plan against actual spend for one period
///
/// Emits one row per (category, subcategory) appearing in either the plan or
/// the actuals. Rows where both sides are zero are omitted. Rows are sorted
/// by (category, subcategory), so identical input yields identical output.
pub fn reconcile(
    config: &AnalyticsConfig,
    plans: &[BudgetEntry],
    actuals: &[Expense],
    month: u32,
    year: i32,
) -> BudgetComparison {
    // Union of plan keys and actual-spend keys
    let mut keys: BTreeMap<(String, String), (f64, f64)> = BTreeMap::new();

    for plan in plans {
        let entry = keys
            .entry((plan.category.clone(), plan.subcategory.clone()))
            .or_insert((0.0, 0.0));
        entry.0 += plan.planned_amount;
    }

    for group in summarize_by_subcategory(actuals) {
        let entry = keys
            .entry((group.category, group.subcategory))
            .or_insert((0.0, 0.0));
        entry.1 = group.total;
    }

    let mut rows = Vec::new();
    let mut total_planned = 0.0;
    let mut total_actual = 0.0;

    for ((category, subcategory), (planned, actual)) in keys {
        if planned == 0.0 && actual == 0.0 {
            continue;
        }

        let (percentage, status) = if planned > 0.0 {
            // Classify on the rounded value so the threshold boundaries
            // land exactly (110.0 is on track, 110.1 is over)
            let pct = round_percent(actual / planned * 100.0);
            let status = if pct < config.under_budget_percent {
                BudgetStatus::UnderBudget
            } else if pct <= config.over_budget_percent {
                BudgetStatus::OnTrack
            } else {
                BudgetStatus::OverBudget
            };
            (Some(pct), status)
        } else {
            // Spend with no plan: percentage is undefined
            (None, BudgetStatus::NoBudgetSet)
        };

        total_planned += planned;
        total_actual += actual;

        rows.push(ComparisonRow {
            category,
            subcategory,
            planned_amount: planned,
            actual_amount: actual,
            difference: actual - planned,
            percentage,
            status,
        });
    }

    BudgetComparison {
        month,
        year,
        total_difference: total_actual - total_planned,
        total_planned,
        total_actual,
        rows,
    }
}
