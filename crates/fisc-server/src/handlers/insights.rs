//! Analytics handlers
//!
//! These expose the four analytics operations over the authenticated
//! user's ledger snapshot.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};

use fisc_core::analytics::types::{AnomalyReport, BudgetComparison, ForecastReport, SavingsReport};
use fisc_core::AnalyticsEngine;

use crate::{core_err, AppError, AppState, CurrentUser};

use super::PeriodQuery;

/// GET /api/reports/budget?month=&year= - Plan-vs-actual reconciliation
pub async fn report_budget(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<BudgetComparison>, AppError> {
    let (month, year) = params.resolve()?;
    let engine = AnalyticsEngine::new(&state.db);
    let report = engine
        .reconcile_budget(user_id, month, year)
        .map_err(core_err)?;
    Ok(Json(report))
}

/// GET /api/insights/forecast - Next-period spend forecast
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<ForecastReport>, AppError> {
    let engine = AnalyticsEngine::new(&state.db);
    let report = engine.forecast_next_period(user_id).map_err(core_err)?;
    Ok(Json(report))
}

/// GET /api/insights/anomalies - Unusual transaction scan
pub async fn anomalies(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<AnomalyReport>, AppError> {
    let engine = AnalyticsEngine::new(&state.db);
    let report = engine.detect_anomalies(user_id).map_err(core_err)?;
    Ok(Json(report))
}

/// GET /api/insights/recommendations?month=&year= - Ranked savings advice
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<SavingsReport>, AppError> {
    let (month, year) = params.resolve()?;
    let engine = AnalyticsEngine::new(&state.db);
    let report = engine
        .recommend_savings(user_id, month, year)
        .map_err(core_err)?;
    Ok(Json(report))
}
