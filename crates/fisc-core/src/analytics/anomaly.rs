//! Statistical outlier detection over expense amounts
//!
//! Flags transactions whose amount deviates abnormally from the rest of the
//! category's history, using a leave-one-out z-score so a single large
//! transaction cannot hide inside its own baseline.

use std::collections::BTreeMap;
use tracing::debug;

use crate::models::{round_cents, Expense};

use super::types::{Anomaly, AnomalyReport, AnomalySeverity};
use super::AnalyticsConfig;

/// Amounts closer than this are treated as zero variance
const VARIANCE_EPSILON: f64 = 1e-9;

/// Stateless per-category outlier scanner
pub struct AnomalyDetector<'a> {
    config: &'a AnalyticsConfig,
}

impl<'a> AnomalyDetector<'a> {
    pub fn new(config: &'a AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Scan a user's expense history for unusual amounts
    ///
    /// Categories with fewer than `anomaly_min_transactions` records are
    /// skipped entirely, as are transactions whose leave-one-out baseline
    /// has zero variance. Zero findings is a success, not an error.
    pub fn detect(&self, expenses: &[Expense]) -> AnomalyReport {
        let mut by_category: BTreeMap<&str, Vec<&Expense>> = BTreeMap::new();
        for expense in expenses {
            by_category
                .entry(expense.category.as_str())
                .or_default()
                .push(expense);
        }

        let mut anomalies = Vec::new();

        for (category, records) in by_category {
            if records.len() < self.config.anomaly_min_transactions {
                debug!(
                    category,
                    count = records.len(),
                    "Skipping category below anomaly minimum"
                );
                continue;
            }

            for (i, record) in records.iter().enumerate() {
                // Baseline excludes the transaction under test
                let baseline: Vec<f64> = records
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, r)| r.amount)
                    .collect();

                let mean = baseline.iter().sum::<f64>() / baseline.len() as f64;
                let variance = baseline
                    .iter()
                    .map(|a| (a - mean).powi(2))
                    .sum::<f64>()
                    / baseline.len() as f64;
                let std_dev = variance.sqrt();

                if std_dev < VARIANCE_EPSILON {
                    continue;
                }

                let z = (record.amount - mean) / std_dev;
                if z.abs() <= self.config.anomaly_z_threshold {
                    continue;
                }

                let band = self.config.anomaly_z_threshold * std_dev;
                let low = (mean - band).max(0.0);
                let high = mean + band;

                let deviation = if record.amount > high {
                    format!(
                        "${:.2} above the typical range",
                        round_cents(record.amount - high)
                    )
                } else {
                    format!(
                        "${:.2} below the typical range",
                        round_cents(low - record.amount)
                    )
                };

                let severity = if z.abs() > self.config.anomaly_high_z {
                    AnomalySeverity::High
                } else if z.abs() > self.config.anomaly_medium_z {
                    AnomalySeverity::Medium
                } else {
                    AnomalySeverity::Low
                };

                anomalies.push(Anomaly {
                    category: record.category.clone(),
                    subcategory: record.subcategory.clone(),
                    amount: record.amount,
                    date: record.expense_date,
                    expected_range: (round_cents(low), round_cents(high)),
                    deviation,
                    severity,
                });
            }
        }

        // Category-major order regardless of how groups were scanned
        anomalies.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(a.date.cmp(&b.date))
                .then(a.amount.total_cmp(&b.amount))
        });

        let found = anomalies.len();
        AnomalyReport {
            success: true,
            message: if found == 0 {
                "No unusual spending detected".to_string()
            } else {
                format!("Found {} unusual transaction(s)", found)
            },
            anomalies_found: found,
            anomalies,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::test_utils::{expense, test_user};

    fn expenses(rows: &[(&str, &str, f64, &str)]) -> Vec<Expense> {
        let db = Database::in_memory().unwrap();
        let user_id = test_user(&db);
        for (cat, sub, amount, date) in rows {
            db.add_expense(user_id, &expense(cat, sub, *amount, date))
                .unwrap();
        }
        db.list_expenses(user_id, None, None).unwrap()
    }

    #[test]
    fn test_outlier_flagged_with_enough_history() {
        let config = AnalyticsConfig::default();
        let detector = AnomalyDetector::new(&config);

        let records = expenses(&[
            ("Food", "Groceries", 100.0, "2026-01-05"),
            ("Food", "Groceries", 105.0, "2026-01-12"),
            ("Food", "Groceries", 95.0, "2026-01-19"),
            ("Food", "Groceries", 102.0, "2026-01-26"),
            ("Food", "Groceries", 98.0, "2026-02-02"),
            ("Food", "Groceries", 600.0, "2026-02-09"),
        ]);

        let report = detector.detect(&records);
        assert!(report.success);
        assert_eq!(report.anomalies_found, 1);

        let anomaly = &report.anomalies[0];
        assert_eq!(anomaly.amount, 600.0);
        assert_eq!(anomaly.category, "Food");
        assert_eq!(anomaly.severity, AnomalySeverity::High);
        assert!(anomaly.deviation.contains("above"));
        assert!(anomaly.expected_range.0 >= 0.0);
        assert!(anomaly.expected_range.1 < 600.0);
    }

    #[test]
    fn test_below_minimum_count_is_skipped() {
        let config = AnalyticsConfig::default();
        let detector = AnomalyDetector::new(&config);

        // Only two transactions: the $600 outlier must not be flagged yet
        let records = expenses(&[
            ("Food", "Groceries", 100.0, "2026-01-05"),
            ("Food", "Groceries", 600.0, "2026-02-09"),
        ]);

        let report = detector.detect(&records);
        assert!(report.success);
        assert_eq!(report.anomalies_found, 0);
        assert!(report.message.contains("No unusual spending"));
    }

    #[test]
    fn test_zero_variance_category_reports_nothing() {
        let config = AnalyticsConfig::default();
        let detector = AnomalyDetector::new(&config);

        let records = expenses(&[
            ("Housing", "Electricity", 120.0, "2026-01-01"),
            ("Housing", "Electricity", 120.0, "2026-02-01"),
            ("Housing", "Electricity", 120.0, "2026-03-01"),
            ("Housing", "Electricity", 120.0, "2026-04-01"),
            ("Housing", "Electricity", 120.0, "2026-05-01"),
            ("Housing", "Electricity", 120.0, "2026-06-01"),
        ]);

        let report = detector.detect(&records);
        assert_eq!(report.anomalies_found, 0);
    }

    #[test]
    fn test_lower_bound_clamped_at_zero() {
        let config = AnalyticsConfig::default();
        let detector = AnomalyDetector::new(&config);

        // Wide spread makes mean - 2σ negative; the reported band must not
        let records = expenses(&[
            ("Pets", "Pet Food", 10.0, "2026-01-01"),
            ("Pets", "Pet Food", 15.0, "2026-02-01"),
            ("Pets", "Pet Food", 12.0, "2026-03-01"),
            ("Pets", "Pet Food", 14.0, "2026-04-01"),
            ("Pets", "Pet Food", 11.0, "2026-05-01"),
            ("Pets", "Pet Food", 400.0, "2026-06-01"),
        ]);

        let report = detector.detect(&records);
        for anomaly in &report.anomalies {
            assert!(anomaly.expected_range.0 >= 0.0);
        }
    }

    #[test]
    fn test_empty_input() {
        let config = AnalyticsConfig::default();
        let detector = AnomalyDetector::new(&config);

        let report = detector.detect(&[]);
        assert!(report.success);
        assert_eq!(report.anomalies_found, 0);
        assert!(report.anomalies.is_empty());
    }
}
