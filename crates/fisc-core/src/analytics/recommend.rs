//! Savings recommendations
//!
//! Combines reconciliation rows, forecasts, anomalies, and the monthly
//! balance into a ranked list of actionable suggestions. Each rule is
//! independently evaluable; evaluation order breaks priority ties.

use crate::models::MonthlyBalance;

use super::types::{
    AnomalyReport, AnomalySeverity, BudgetComparison, BudgetStatus, ForecastReport, Priority,
    Recommendation, RecommendationKind, SavingsReport, Trend,
};
use super::AnalyticsConfig;

/// Stateless rule engine over the other components' outputs
pub struct RecommendationEngine<'a> {
    config: &'a AnalyticsConfig,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(config: &'a AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Produce ranked savings advice for one period
    pub fn recommend(
        &self,
        comparison: &BudgetComparison,
        forecast: &ForecastReport,
        anomalies: &AnomalyReport,
        balance: &MonthlyBalance,
    ) -> SavingsReport {
        let mut recommendations = Vec::new();

        // Rule 1: categories running over their plan
        for row in &comparison.rows {
            if row.status != BudgetStatus::OverBudget {
                continue;
            }
            let overage = row.difference;
            recommendations.push(Recommendation {
                kind: RecommendationKind::Overspend,
                category: row.category.clone(),
                priority: Priority::High,
                message: format!(
                    "{} / {} is over budget: spent ${:.2} of a ${:.2} plan",
                    row.category, row.subcategory, row.actual_amount, row.planned_amount
                ),
                suggestion: format!(
                    "Reduce {} spending by ${:.2} to get back to plan",
                    row.subcategory, overage
                ),
                potential_savings: Some(overage),
            });
        }

        // Rule 2: confidently rising categories
        for prediction in forecast.predictions.values() {
            if prediction.trend != Trend::Increasing
                || prediction.confidence < self.config.trend_confidence_floor
            {
                continue;
            }
            let projected_rise = prediction.predicted_amount - prediction.historical_average;
            recommendations.push(Recommendation {
                kind: RecommendationKind::RisingTrend,
                category: prediction.category.clone(),
                priority: Priority::Medium,
                message: format!(
                    "{} spending is trending up: next month is projected at ${:.2} against a ${:.2} average",
                    prediction.category, prediction.predicted_amount, prediction.historical_average
                ),
                suggestion: format!(
                    "Review recent {} purchases before the trend compounds",
                    prediction.category
                ),
                potential_savings: if projected_rise > 0.0 {
                    Some(projected_rise)
                } else {
                    None
                },
            });
        }

        // Rule 3: notable outlier transactions
        for anomaly in &anomalies.anomalies {
            if anomaly.severity == AnomalySeverity::Low {
                continue;
            }
            recommendations.push(Recommendation {
                kind: RecommendationKind::UnusualSpending,
                category: anomaly.category.clone(),
                priority: Priority::Medium,
                message: format!(
                    "Unusual {} charge of ${:.2} on {} ({})",
                    anomaly.subcategory, anomaly.amount, anomaly.date, anomaly.deviation
                ),
                suggestion: "Check whether this charge was expected or a one-off".to_string(),
                potential_savings: None,
            });
        }

        // Rule 4: overall savings rate too low
        if balance.savings_rate < self.config.low_savings_rate_floor {
            recommendations.push(Recommendation {
                kind: RecommendationKind::LowSavingsRate,
                category: "Overall".to_string(),
                priority: Priority::High,
                message: format!(
                    "Savings rate is {:.1}%, below the {:.0}% target",
                    balance.savings_rate, self.config.low_savings_rate_floor
                ),
                suggestion:
                    "Set aside a fixed amount at the start of the month before discretionary spending"
                        .to_string(),
                potential_savings: None,
            });
        }

        // Stable sort keeps rule order within the same priority
        recommendations.sort_by_key(|r| std::cmp::Reverse(r.priority.rank()));

        let total_potential_savings = recommendations
            .iter()
            .filter_map(|r| r.potential_savings)
            .sum();

        let count = recommendations.len();
        SavingsReport {
            success: true,
            message: if count == 0 {
                "No recommendations right now - spending looks healthy".to_string()
            } else {
                format!("Generated {} recommendation(s)", count)
            },
            recommendations,
            total_potential_savings,
            current_savings_rate: balance.savings_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::types::{Anomaly, ComparisonRow, Prediction};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn empty_comparison() -> BudgetComparison {
        BudgetComparison {
            month: 3,
            year: 2026,
            rows: vec![],
            total_planned: 0.0,
            total_actual: 0.0,
            total_difference: 0.0,
        }
    }

    fn empty_forecast() -> ForecastReport {
        ForecastReport {
            success: true,
            message: String::new(),
            analysis_period: "last 3 months".to_string(),
            total_predicted: 0.0,
            predictions: BTreeMap::new(),
        }
    }

    fn empty_anomalies() -> AnomalyReport {
        AnomalyReport {
            success: true,
            message: String::new(),
            anomalies_found: 0,
            anomalies: vec![],
        }
    }

    fn healthy_balance() -> MonthlyBalance {
        MonthlyBalance {
            income: 3000.0,
            expenses: 2000.0,
            balance: 1000.0,
            savings_rate: 33.3,
        }
    }

    fn over_budget_row() -> ComparisonRow {
        ComparisonRow {
            category: "Food".to_string(),
            subcategory: "Groceries".to_string(),
            planned_amount: 300.0,
            actual_amount: 420.0,
            difference: 120.0,
            percentage: Some(140.0),
            status: BudgetStatus::OverBudget,
        }
    }

    #[test]
    fn test_overspend_rule() {
        let config = AnalyticsConfig::default();
        let engine = RecommendationEngine::new(&config);

        let mut comparison = empty_comparison();
        comparison.rows.push(over_budget_row());

        let report = engine.recommend(
            &comparison,
            &empty_forecast(),
            &empty_anomalies(),
            &healthy_balance(),
        );

        assert_eq!(report.recommendations.len(), 1);
        let rec = &report.recommendations[0];
        assert_eq!(rec.kind, RecommendationKind::Overspend);
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.potential_savings, Some(120.0));
        assert_eq!(report.total_potential_savings, 120.0);
    }

    #[test]
    fn test_rising_trend_rule_respects_confidence_floor() {
        let config = AnalyticsConfig::default();
        let engine = RecommendationEngine::new(&config);

        let mut forecast = empty_forecast();
        forecast.predictions.insert(
            "Food".to_string(),
            Prediction {
                category: "Food".to_string(),
                predicted_amount: 260.0,
                historical_average: 200.0,
                trend: Trend::Increasing,
                confidence: 80.0,
            },
        );
        forecast.predictions.insert(
            "Pets".to_string(),
            Prediction {
                category: "Pets".to_string(),
                predicted_amount: 90.0,
                historical_average: 60.0,
                trend: Trend::Increasing,
                confidence: 20.0, // below the floor
            },
        );

        let report = engine.recommend(
            &empty_comparison(),
            &forecast,
            &empty_anomalies(),
            &healthy_balance(),
        );

        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.recommendations[0].category, "Food");
        assert_eq!(report.recommendations[0].priority, Priority::Medium);
    }

    #[test]
    fn test_anomaly_rule_skips_low_severity() {
        let config = AnalyticsConfig::default();
        let engine = RecommendationEngine::new(&config);

        let mut anomalies = empty_anomalies();
        for (amount, severity) in [
            (600.0, AnomalySeverity::High),
            (180.0, AnomalySeverity::Low),
        ] {
            anomalies.anomalies.push(Anomaly {
                category: "Food".to_string(),
                subcategory: "Groceries".to_string(),
                amount,
                date: NaiveDate::from_ymd_opt(2026, 2, 9).unwrap(),
                expected_range: (80.0, 120.0),
                deviation: "above the typical range".to_string(),
                severity,
            });
        }
        anomalies.anomalies_found = anomalies.anomalies.len();

        let report = engine.recommend(
            &empty_comparison(),
            &empty_forecast(),
            &anomalies,
            &healthy_balance(),
        );

        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(
            report.recommendations[0].kind,
            RecommendationKind::UnusualSpending
        );
        assert!(report.recommendations[0].message.contains("600.00"));
    }

    #[test]
    fn test_low_savings_rate_rule() {
        let config = AnalyticsConfig::default();
        let engine = RecommendationEngine::new(&config);

        let balance = MonthlyBalance {
            income: 2000.0,
            expenses: 1900.0,
            balance: 100.0,
            savings_rate: 5.0,
        };

        let report = engine.recommend(
            &empty_comparison(),
            &empty_forecast(),
            &empty_anomalies(),
            &balance,
        );

        assert_eq!(report.recommendations.len(), 1);
        let rec = &report.recommendations[0];
        assert_eq!(rec.kind, RecommendationKind::LowSavingsRate);
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(report.current_savings_rate, 5.0);
    }

    #[test]
    fn test_sorted_by_priority_with_rule_order_ties() {
        let config = AnalyticsConfig::default();
        let engine = RecommendationEngine::new(&config);

        let mut comparison = empty_comparison();
        comparison.rows.push(over_budget_row());

        let mut forecast = empty_forecast();
        forecast.predictions.insert(
            "Pets".to_string(),
            Prediction {
                category: "Pets".to_string(),
                predicted_amount: 90.0,
                historical_average: 60.0,
                trend: Trend::Increasing,
                confidence: 70.0,
            },
        );

        let balance = MonthlyBalance {
            income: 2000.0,
            expenses: 1950.0,
            balance: 50.0,
            savings_rate: 2.5,
        };

        let report = engine.recommend(&comparison, &forecast, &empty_anomalies(), &balance);

        assert_eq!(report.recommendations.len(), 3);
        // Both High rules first in evaluation order, Medium after
        assert_eq!(report.recommendations[0].kind, RecommendationKind::Overspend);
        assert_eq!(
            report.recommendations[1].kind,
            RecommendationKind::LowSavingsRate
        );
        assert_eq!(
            report.recommendations[2].kind,
            RecommendationKind::RisingTrend
        );
    }

    #[test]
    fn test_no_rules_firing_is_success() {
        let config = AnalyticsConfig::default();
        let engine = RecommendationEngine::new(&config);

        let report = engine.recommend(
            &empty_comparison(),
            &empty_forecast(),
            &empty_anomalies(),
            &healthy_balance(),
        );

        assert!(report.success);
        assert!(report.recommendations.is_empty());
        assert_eq!(report.total_potential_savings, 0.0);
    }

    #[test]
    fn test_savings_never_negative_and_total_exact() {
        let config = AnalyticsConfig::default();
        let engine = RecommendationEngine::new(&config);

        let mut comparison = empty_comparison();
        comparison.rows.push(over_budget_row());

        let mut forecast = empty_forecast();
        forecast.predictions.insert(
            "Housing".to_string(),
            Prediction {
                category: "Housing".to_string(),
                predicted_amount: 310.0,
                historical_average: 250.0,
                trend: Trend::Increasing,
                confidence: 90.0,
            },
        );

        let report = engine.recommend(
            &comparison,
            &forecast,
            &empty_anomalies(),
            &healthy_balance(),
        );

        let sum: f64 = report
            .recommendations
            .iter()
            .filter_map(|r| r.potential_savings)
            .sum();
        assert!(report
            .recommendations
            .iter()
            .all(|r| r.potential_savings.unwrap_or(0.0) >= 0.0));
        assert_eq!(report.total_potential_savings, sum);
        assert!((sum - 180.0).abs() < 1e-9);
    }
}
