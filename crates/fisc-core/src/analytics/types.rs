//! Result types for the analytics engine

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Aggregated spend for one (category, subcategory) group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub subcategory: String,
    pub total: f64,
    pub count: usize,
    pub mean: f64,
}

/// One month's total spend for a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

/// Plan-vs-actual status for one comparison row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetStatus {
    #[serde(rename = "Under Budget")]
    UnderBudget,
    #[serde(rename = "On Track")]
    OnTrack,
    #[serde(rename = "Over Budget")]
    OverBudget,
    #[serde(rename = "No Budget Set")]
    NoBudgetSet,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::UnderBudget => "Under Budget",
            BudgetStatus::OnTrack => "On Track",
            BudgetStatus::OverBudget => "Over Budget",
            BudgetStatus::NoBudgetSet => "No Budget Set",
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One plan-vs-actual comparison row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub category: String,
    pub subcategory: String,
    pub planned_amount: f64,
    pub actual_amount: f64,
    /// actual - planned
    pub difference: f64,
    /// actual / planned * 100, rounded to one decimal; None when no plan
    /// exists for the row
    pub percentage: Option<f64>,
    pub status: BudgetStatus,
}

/// Full reconciliation table for one period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub month: u32,
    pub year: i32,
    pub rows: Vec<ComparisonRow>,
    pub total_planned: f64,
    pub total_actual: f64,
    pub total_difference: f64,
}

/// Qualitative direction of a category's recent spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Increasing => "Increasing",
            Trend::Decreasing => "Decreasing",
            Trend::Stable => "Stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Next-period spend estimate for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub category: String,
    pub predicted_amount: f64,
    pub historical_average: f64,
    pub trend: Trend,
    /// 0-100 score; grows with history length and spending stability
    pub confidence: f64,
}

/// Forecast result across all categories with enough history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub success: bool,
    pub message: String,
    /// e.g. "last 6 months"
    pub analysis_period: String,
    pub total_predicted: f64,
    pub predictions: BTreeMap<String, Prediction>,
}

impl ForecastReport {
    /// The not-enough-data result
    pub fn insufficient(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            analysis_period: String::new(),
            total_predicted: 0.0,
            predictions: BTreeMap::new(),
        }
    }
}

/// Severity of a flagged transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
}

impl AnomalySeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnomalySeverity::Low => "Low",
            AnomalySeverity::Medium => "Medium",
            AnomalySeverity::High => "High",
        }
    }
}

impl fmt::Display for AnomalySeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A transaction whose amount is a statistical outlier for its category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Anomaly {
    pub category: String,
    pub subcategory: String,
    pub amount: f64,
    pub date: NaiveDate,
    /// [low, high] band of typical amounts; low is clamped at zero
    pub expected_range: (f64, f64),
    /// Human-readable delta, e.g. "$412.50 above the typical range"
    pub deviation: String,
    pub severity: AnomalySeverity,
}

/// Anomaly scan result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub success: bool,
    pub message: String,
    pub anomalies_found: usize,
    pub anomalies: Vec<Anomaly>,
}

/// What kind of advice a recommendation carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    #[serde(rename = "Budget Overspend")]
    Overspend,
    #[serde(rename = "Rising Trend")]
    RisingTrend,
    #[serde(rename = "Unusual Spending")]
    UnusualSpending,
    #[serde(rename = "Low Savings Rate")]
    LowSavingsRate,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Overspend => "Budget Overspend",
            RecommendationKind::RisingTrend => "Rising Trend",
            RecommendationKind::UnusualSpending => "Unusual Spending",
            RecommendationKind::LowSavingsRate => "Low Savings Rate",
        }
    }
}

impl fmt::Display for RecommendationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How urgent a recommendation is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Numeric rank for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// One actionable savings suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub category: String,
    pub priority: Priority,
    pub message: String,
    pub suggestion: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_savings: Option<f64>,
}

/// Ranked savings advice for one period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsReport {
    pub success: bool,
    pub message: String,
    pub recommendations: Vec<Recommendation>,
    pub total_potential_savings: f64,
    pub current_savings_rate: f64,
}
