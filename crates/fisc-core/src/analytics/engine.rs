//! Analytics engine facade
//!
//! Wires the ledger database to the pure analytics components. Each
//! operation reads a fresh snapshot of the user's records, runs the
//! relevant transforms, and returns a fully materialized result - nothing
//! is cached or mutated between calls.

use tracing::warn;

use crate::db::Database;
use crate::error::Result;
use crate::models::Expense;
use crate::taxonomy::TAXONOMY;

use super::types::{AnomalyReport, BudgetComparison, ForecastReport, SavingsReport};
use super::{
    monthly_series, reconcile, AnalyticsConfig, AnomalyDetector, RecommendationEngine,
    TrendForecaster,
};

/// One-shot analytics pipeline over a user's ledger
pub struct AnalyticsEngine<'a> {
    db: &'a Database,
    config: AnalyticsConfig,
}

impl<'a> AnalyticsEngine<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            config: AnalyticsConfig::default(),
        }
    }

    pub fn with_config(db: &'a Database, config: AnalyticsConfig) -> Self {
        Self { db, config }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Plan-vs-actual comparison for one month
    pub fn reconcile_budget(
        &self,
        user_id: i64,
        month: u32,
        year: i32,
    ) -> Result<BudgetComparison> {
        let plans = self.db.get_budget_plan(user_id, month, year)?;
        let actuals = self.valid_expenses(self.db.list_expenses_for_month(user_id, month, year)?);
        Ok(reconcile(&self.config, &plans, &actuals, month, year))
    }

    /// Next-period spend forecast across the user's full history
    pub fn forecast_next_period(&self, user_id: i64) -> Result<ForecastReport> {
        let expenses = self.valid_expenses(self.db.list_expenses(user_id, None, None)?);
        let series = monthly_series(&expenses);
        Ok(TrendForecaster::new(&self.config).forecast(&series))
    }

    /// Outlier scan across the user's full history
    pub fn detect_anomalies(&self, user_id: i64) -> Result<AnomalyReport> {
        let expenses = self.valid_expenses(self.db.list_expenses(user_id, None, None)?);
        Ok(AnomalyDetector::new(&self.config).detect(&expenses))
    }

    /// Ranked savings advice for one month
    ///
    /// Runs the reconciler, forecaster, and anomaly detector, then feeds
    /// their output plus the month's balance through the rule engine.
    pub fn recommend_savings(&self, user_id: i64, month: u32, year: i32) -> Result<SavingsReport> {
        let comparison = self.reconcile_budget(user_id, month, year)?;
        let forecast = self.forecast_next_period(user_id)?;
        let anomalies = self.detect_anomalies(user_id)?;
        let balance = self.db.get_monthly_balance(user_id, month, year)?;

        Ok(RecommendationEngine::new(&self.config).recommend(
            &comparison,
            &forecast,
            &anomalies,
            &balance,
        ))
    }

    /// Drop records whose (category, subcategory) no longer exists in the
    /// taxonomy instead of failing the whole computation
    fn valid_expenses(&self, expenses: Vec<Expense>) -> Vec<Expense> {
        let (valid, invalid): (Vec<_>, Vec<_>) = expenses
            .into_iter()
            .partition(|e| TAXONOMY.is_valid_expense(&e.category, &e.subcategory));
        if !invalid.is_empty() {
            warn!(
                count = invalid.len(),
                "Ignoring expenses outside the taxonomy"
            );
        }
        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::types::{BudgetStatus, RecommendationKind, Trend};
    use crate::test_utils::{expense, income, test_user};

    #[test]
    fn test_reconcile_budget_end_to_end() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        db.set_budget(user_id, "Housing", "Electricity", 300.0, 3, 2026)
            .unwrap();
        db.add_expense(
            user_id,
            &expense("Housing", "Electricity", 330.0, "2026-03-12"),
        )
        .unwrap();
        // Out-of-period spend must not count
        db.add_expense(
            user_id,
            &expense("Housing", "Electricity", 500.0, "2026-02-12"),
        )
        .unwrap();

        let engine = AnalyticsEngine::new(&db);
        let report = engine.reconcile_budget(user_id, 3, 2026).unwrap();

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].percentage, Some(110.0));
        assert_eq!(report.rows[0].status, BudgetStatus::OnTrack);
        assert_eq!(report.total_planned, 300.0);
        assert_eq!(report.total_actual, 330.0);
    }

    #[test]
    fn test_forecast_minimum_flat_history() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        for date in ["2026-01-10", "2026-02-10", "2026-03-10"] {
            db.add_expense(user_id, &expense("Food", "Groceries", 200.0, date))
                .unwrap();
        }

        let engine = AnalyticsEngine::new(&db);
        let report = engine.forecast_next_period(user_id).unwrap();

        assert!(report.success);
        let prediction = &report.predictions["Food"];
        assert_eq!(prediction.trend, Trend::Stable);
        assert!((prediction.predicted_amount - 200.0).abs() < 1e-9);
        assert!(prediction.confidence > 0.0);
    }

    #[test]
    fn test_forecast_empty_ledger() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let engine = AnalyticsEngine::new(&db);
        let report = engine.forecast_next_period(user_id).unwrap();
        assert!(!report.success);
        assert!(report.predictions.is_empty());
    }

    #[test]
    fn test_detect_anomalies_end_to_end() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        for (amount, date) in [
            (100.0, "2026-01-05"),
            (95.0, "2026-01-15"),
            (105.0, "2026-01-25"),
            (102.0, "2026-02-05"),
            (98.0, "2026-02-15"),
            (600.0, "2026-02-20"),
        ] {
            db.add_expense(user_id, &expense("Food", "Groceries", amount, date))
                .unwrap();
        }

        let engine = AnalyticsEngine::new(&db);
        let report = engine.detect_anomalies(user_id).unwrap();
        assert_eq!(report.anomalies_found, 1);
        assert_eq!(report.anomalies[0].amount, 600.0);
    }

    #[test]
    fn test_recommend_savings_low_rate() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        db.add_income(user_id, &income("Salary", 2000.0, "2026-03-01"))
            .unwrap();
        db.add_expense(user_id, &expense("Food", "Groceries", 1900.0, "2026-03-10"))
            .unwrap();

        let engine = AnalyticsEngine::new(&db);
        let report = engine.recommend_savings(user_id, 3, 2026).unwrap();

        assert!(report.success);
        assert!(report
            .recommendations
            .iter()
            .any(|r| r.kind == RecommendationKind::LowSavingsRate
                && r.priority == crate::analytics::Priority::High));
        assert!((report.current_savings_rate - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_recommendations_empty_ledger_is_success() {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);

        let engine = AnalyticsEngine::new(&db);
        let report = engine.recommend_savings(user_id, 3, 2026).unwrap();
        assert!(report.success);
        // Zero income reports a 0% savings rate, which trips the low-rate
        // rule; nothing else can fire on an empty ledger
        assert!(report
            .recommendations
            .iter()
            .all(|r| r.kind == RecommendationKind::LowSavingsRate));
    }
}
