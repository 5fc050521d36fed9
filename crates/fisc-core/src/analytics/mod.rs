//! Budget analytics engine
//!
//! A one-shot pipeline of pure transforms over a ledger snapshot:
//! - `aggregate` - groups expenses into per-subcategory and per-month totals
//! - `reconcile` - joins a budget plan against actual spend for one period
//! - `forecast` - next-period spend estimates with trend and confidence
//! - `anomaly` - z-score outlier detection over per-category history
//! - `recommend` - ranks the other components' signals into savings advice
//! - `engine` - wires the ledger database to the pure components
//!
//! No component retains state between invocations; every run recomputes from
//! the current ledger snapshot.

mod aggregate;
mod anomaly;
mod engine;
mod forecast;
mod reconcile;
mod recommend;
pub mod types;

pub use aggregate::{monthly_series, summarize_by_subcategory};
pub use anomaly::AnomalyDetector;
pub use engine::AnalyticsEngine;
pub use forecast::TrendForecaster;
pub use reconcile::reconcile;
pub use recommend::RecommendationEngine;
pub use types::{
    Anomaly, AnomalyReport, AnomalySeverity, BudgetComparison, BudgetStatus, CategorySpend,
    ComparisonRow, ForecastReport, MonthlyPoint, Prediction, Priority, Recommendation,
    RecommendationKind, SavingsReport, Trend,
};

/// Analytics policy parameters
///
/// The heuristic thresholds are tunable defaults, not exact reproductions of
/// any reference output; callers that want different sensitivity adjust this
/// struct rather than the algorithms.
#[derive(Debug, Clone)]
pub struct AnalyticsConfig {
    /// Percentage below which a budget row counts as under budget
    pub under_budget_percent: f64,
    /// Percentage above which a budget row counts as over budget
    pub over_budget_percent: f64,

    /// Months of history required before a category is forecast
    pub min_history_months: usize,
    /// Trailing window used for forecasting (months)
    pub analysis_window_months: usize,
    /// Relative half-over-half change required to label a trend (e.g. 0.10 = 10%)
    pub trend_threshold: f64,
    /// Bound on the trend adjustment applied to the average (e.g. 0.50 = ±50%)
    pub trend_adjustment_clamp: f64,
    /// Months of history at which the confidence history term saturates
    pub confidence_saturation_months: usize,

    /// Minimum transactions in a category before anomaly scanning
    pub anomaly_min_transactions: usize,
    /// |z| above which a transaction is flagged
    pub anomaly_z_threshold: f64,
    /// |z| above which severity is Medium
    pub anomaly_medium_z: f64,
    /// |z| above which severity is High
    pub anomaly_high_z: f64,

    /// Minimum forecast confidence for the rising-trend rule
    pub trend_confidence_floor: f64,
    /// Savings rate (percent) below which the low-savings rule fires
    pub low_savings_rate_floor: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            under_budget_percent: 90.0,
            over_budget_percent: 110.0,
            min_history_months: 3,
            analysis_window_months: 6,
            trend_threshold: 0.10,       // 10% half-over-half change
            trend_adjustment_clamp: 0.50, // never extrapolate past ±50%
            confidence_saturation_months: 6,
            anomaly_min_transactions: 5,
            anomaly_z_threshold: 2.0,
            anomaly_medium_z: 2.5,
            anomaly_high_z: 3.0,
            trend_confidence_floor: 60.0,
            low_savings_rate_floor: 10.0, // flag savings rates under 10%
        }
    }
}
