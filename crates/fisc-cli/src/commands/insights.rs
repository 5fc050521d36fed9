//! Forecast, anomaly, and recommendation commands

use anyhow::Result;
use fisc_core::analytics::Priority;
use fisc_core::db::Database;
use fisc_core::AnalyticsEngine;

use super::truncate;

pub fn cmd_insights_forecast(db: &Database, user_id: i64) -> Result<()> {
    let engine = AnalyticsEngine::new(db);
    let report = engine.forecast_next_period(user_id)?;

    println!();
    println!("🔮 Next Month Forecast");
    println!("   ─────────────────────────────────────────────────────────────");

    if !report.success {
        println!("   {}", report.message);
        return Ok(());
    }

    println!("   Analysis window: {}", report.analysis_period);
    println!("   Total predicted: ${:.2}", report.total_predicted);
    println!();
    println!(
        "   {:20} │ {:>10} │ {:>10} │ {:10} │ {:>6}",
        "Category", "Predicted", "Hist. Avg", "Trend", "Conf."
    );
    println!("   ─────────────────────┼────────────┼────────────┼────────────┼───────");

    for prediction in report.predictions.values() {
        println!(
            "   {:20} │ {:>10.2} │ {:>10.2} │ {:10} │ {:>5.1}%",
            truncate(&prediction.category, 20),
            prediction.predicted_amount,
            prediction.historical_average,
            prediction.trend.to_string(),
            prediction.confidence
        );
    }

    Ok(())
}

pub fn cmd_insights_anomalies(db: &Database, user_id: i64) -> Result<()> {
    let engine = AnalyticsEngine::new(db);
    let report = engine.detect_anomalies(user_id)?;

    println!();
    println!("🔍 Unusual Spending");
    println!("   ─────────────────────────────────────────────────────────────");

    if report.anomalies_found == 0 {
        println!("   ✅ {}", report.message);
        return Ok(());
    }

    println!("   ⚠️  {}", report.message);
    println!();

    for anomaly in &report.anomalies {
        println!(
            "   🚨 {} / {} - ${:.2} on {} [{}]",
            anomaly.category, anomaly.subcategory, anomaly.amount, anomaly.date, anomaly.severity
        );
        println!(
            "      Expected ${:.2} - ${:.2}; {}",
            anomaly.expected_range.0, anomaly.expected_range.1, anomaly.deviation
        );
    }

    Ok(())
}

pub fn cmd_insights_recommend(db: &Database, user_id: i64, month: u32, year: i32) -> Result<()> {
    let engine = AnalyticsEngine::new(db);
    let report = engine.recommend_savings(user_id, month, year)?;

    println!();
    println!("💡 Savings Recommendations - {:02}/{}", month, year);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   Potential monthly savings: ${:.2}   Current savings rate: {:.1}%",
        report.total_potential_savings, report.current_savings_rate
    );
    println!();

    if report.recommendations.is_empty() {
        println!("   ✅ {}", report.message);
        return Ok(());
    }

    for rec in &report.recommendations {
        let marker = match rec.priority {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
            Priority::Low => "🟢",
        };
        println!("   {} [{}] {}: {}", marker, rec.priority, rec.kind, rec.category);
        println!("      {}", rec.message);
        println!("      💡 {}", rec.suggestion);
        if let Some(savings) = rec.potential_savings {
            println!("      💰 Potential savings: ${:.2}", savings);
        }
    }

    Ok(())
}
