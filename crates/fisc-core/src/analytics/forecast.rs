//! Next-period spend forecasting
//!
//! For each category with enough monthly history, estimates next month's
//! spend from the trailing-window average, adjusted by the half-over-half
//! trend, with a confidence score that grows with history length and
//! spending stability.

use std::collections::BTreeMap;
use tracing::debug;

use super::types::{ForecastReport, MonthlyPoint, Prediction, Trend};
use super::AnalyticsConfig;

/// Stateless forecaster over per-category monthly series
pub struct TrendForecaster<'a> {
    config: &'a AnalyticsConfig,
}

impl<'a> TrendForecaster<'a> {
    pub fn new(config: &'a AnalyticsConfig) -> Self {
        Self { config }
    }

    /// Forecast next-period spend per category
    ///
    /// Categories with fewer than `min_history_months` distinct months are
    /// excluded. The result is `success = false` only when no category has
    /// enough history.
    pub fn forecast(&self, series: &BTreeMap<String, Vec<MonthlyPoint>>) -> ForecastReport {
        let mut predictions = BTreeMap::new();
        let mut total_predicted = 0.0;
        let mut widest_window = 0usize;

        for (category, points) in series {
            if points.len() < self.config.min_history_months {
                debug!(
                    category = %category,
                    months = points.len(),
                    "Skipping category with insufficient history"
                );
                continue;
            }

            // Trailing window, series is already month-ascending
            let window_start = points.len().saturating_sub(self.config.analysis_window_months);
            let window: Vec<f64> = points[window_start..].iter().map(|p| p.total).collect();
            widest_window = widest_window.max(window.len());

            let prediction = self.predict_category(category, &window);
            total_predicted += prediction.predicted_amount;
            predictions.insert(category.clone(), prediction);
        }

        if predictions.is_empty() {
            return ForecastReport::insufficient(format!(
                "Not enough history to forecast: at least {} months of spending per category are needed",
                self.config.min_history_months
            ));
        }

        ForecastReport {
            success: true,
            message: format!("Forecast generated for {} categories", predictions.len()),
            analysis_period: format!("last {} months", widest_window),
            total_predicted,
            predictions,
        }
    }

    /// Build a single category's prediction from its trailing window
    fn predict_category(&self, category: &str, window: &[f64]) -> Prediction {
        let average = mean(window);

        // Compare the most recent half of the window against the earlier
        // half; the middle month of an odd window belongs to neither
        let half = window.len() / 2;
        let earlier_mean = mean(&window[..half]);
        let recent_mean = mean(&window[window.len() - half..]);

        let delta = if earlier_mean > 0.0 {
            (recent_mean - earlier_mean) / earlier_mean
        } else if recent_mean > 0.0 {
            // Spending appeared from nothing: treat as the maximum allowed rise
            self.config.trend_adjustment_clamp
        } else {
            0.0
        };

        let trend = if delta > self.config.trend_threshold {
            Trend::Increasing
        } else if delta < -self.config.trend_threshold {
            Trend::Decreasing
        } else {
            Trend::Stable
        };

        // Project the average forward by the observed delta, clamped so one
        // outlier month cannot run away with the estimate
        let clamp = self.config.trend_adjustment_clamp;
        let adjustment = delta.clamp(-clamp, clamp);
        let predicted = (average * (1.0 + adjustment)).max(0.0);

        Prediction {
            category: category.to_string(),
            predicted_amount: predicted,
            historical_average: average,
            trend,
            confidence: self.confidence(window, average),
        }
    }

    /// 0-100 confidence: half from history length (saturating), half from
    /// the inverse coefficient of variation
    fn confidence(&self, window: &[f64], average: f64) -> f64 {
        let saturation = self.config.confidence_saturation_months.max(1) as f64;
        let history_score = (window.len() as f64 / saturation).min(1.0);

        let stability_score = if average > 0.0 {
            let cv = std_dev(window, average) / average;
            1.0 / (1.0 + cv)
        } else {
            0.0
        };

        (50.0 * history_score + 50.0 * stability_score).clamp(0.0, 100.0)
    }
}

/// Arithmetic mean; 0 for an empty slice
fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation around a known mean
fn std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(category: &str, totals: &[f64]) -> BTreeMap<String, Vec<MonthlyPoint>> {
        let mut map = BTreeMap::new();
        let points = totals
            .iter()
            .enumerate()
            .map(|(i, &total)| MonthlyPoint {
                year: 2026,
                month: i as u32 + 1,
                total,
            })
            .collect();
        map.insert(category.to_string(), points);
        map
    }

    #[test]
    fn test_flat_spending_is_stable() {
        let config = AnalyticsConfig::default();
        let forecaster = TrendForecaster::new(&config);

        let report = forecaster.forecast(&series("Food", &[200.0, 200.0, 200.0]));
        assert!(report.success);

        let prediction = &report.predictions["Food"];
        assert_eq!(prediction.trend, Trend::Stable);
        assert!((prediction.predicted_amount - 200.0).abs() < 1e-9);
        assert!((prediction.historical_average - 200.0).abs() < 1e-9);
        assert!(prediction.confidence > 0.0);
    }

    #[test]
    fn test_rising_spending_is_increasing() {
        let config = AnalyticsConfig::default();
        let forecaster = TrendForecaster::new(&config);

        let report = forecaster.forecast(&series("Food", &[100.0, 150.0, 200.0, 250.0]));
        let prediction = &report.predictions["Food"];
        assert_eq!(prediction.trend, Trend::Increasing);
        assert!(prediction.predicted_amount > prediction.historical_average);
    }

    #[test]
    fn test_falling_spending_is_decreasing() {
        let config = AnalyticsConfig::default();
        let forecaster = TrendForecaster::new(&config);

        let report = forecaster.forecast(&series("Food", &[400.0, 300.0, 200.0, 100.0]));
        let prediction = &report.predictions["Food"];
        assert_eq!(prediction.trend, Trend::Decreasing);
        assert!(prediction.predicted_amount < prediction.historical_average);
    }

    #[test]
    fn test_adjustment_is_clamped() {
        let config = AnalyticsConfig::default();
        let forecaster = TrendForecaster::new(&config);

        // 10x half-over-half explosion must not 10x the estimate
        let report = forecaster.forecast(&series("Food", &[10.0, 10.0, 100.0, 100.0]));
        let prediction = &report.predictions["Food"];
        assert_eq!(prediction.trend, Trend::Increasing);
        let max_allowed =
            prediction.historical_average * (1.0 + config.trend_adjustment_clamp) + 1e-9;
        assert!(prediction.predicted_amount <= max_allowed);
    }

    #[test]
    fn test_insufficient_history_fails_softly() {
        let config = AnalyticsConfig::default();
        let forecaster = TrendForecaster::new(&config);

        let report = forecaster.forecast(&series("Food", &[200.0, 210.0]));
        assert!(!report.success);
        assert!(report.predictions.is_empty());
        assert!(report.message.contains("Not enough history"));
        assert_eq!(report.total_predicted, 0.0);
    }

    #[test]
    fn test_mixed_eligibility_keeps_eligible_subset() {
        let config = AnalyticsConfig::default();
        let forecaster = TrendForecaster::new(&config);

        let mut map = series("Food", &[200.0, 200.0, 200.0]);
        map.extend(series("Pets", &[30.0]));

        let report = forecaster.forecast(&map);
        assert!(report.success);
        assert_eq!(report.predictions.len(), 1);
        assert!(report.predictions.contains_key("Food"));
        assert_eq!(report.analysis_period, "last 3 months");
    }

    #[test]
    fn test_window_trims_old_months() {
        let config = AnalyticsConfig::default();
        let forecaster = TrendForecaster::new(&config);

        // Nine months of history; only the last six should be used
        let report = forecaster.forecast(&series(
            "Food",
            &[9999.0, 9999.0, 9999.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0],
        ));
        let prediction = &report.predictions["Food"];
        assert!((prediction.historical_average - 100.0).abs() < 1e-9);
        assert_eq!(report.analysis_period, "last 6 months");
    }

    #[test]
    fn test_confidence_bounds() {
        let config = AnalyticsConfig::default();
        let forecaster = TrendForecaster::new(&config);

        // Highly erratic spending still stays within [0, 100]
        let report = forecaster.forecast(&series("Food", &[1.0, 900.0, 2.0, 800.0, 3.0, 700.0]));
        let prediction = &report.predictions["Food"];
        assert!(prediction.confidence >= 0.0);
        assert!(prediction.confidence <= 100.0);

        // Flat series with a full window scores higher than an erratic one
        let flat = forecaster.forecast(&series(
            "Food",
            &[100.0, 100.0, 100.0, 100.0, 100.0, 100.0],
        ));
        assert!(flat.predictions["Food"].confidence > prediction.confidence);
    }

    #[test]
    fn test_total_predicted_sums_categories() {
        let config = AnalyticsConfig::default();
        let forecaster = TrendForecaster::new(&config);

        let mut map = series("Food", &[200.0, 200.0, 200.0]);
        map.extend(series("Housing", &[100.0, 100.0, 100.0]));

        let report = forecaster.forecast(&map);
        let sum: f64 = report
            .predictions
            .values()
            .map(|p| p.predicted_amount)
            .sum();
        assert!((report.total_predicted - sum).abs() < 1e-9);
    }
}
