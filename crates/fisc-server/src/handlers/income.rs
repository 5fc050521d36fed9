//! Income and balance handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::Serialize;

use fisc_core::models::{Income, MonthlyBalance, NewIncome};

use crate::{core_err, AppError, AppState, CurrentUser, SuccessResponse};

use super::expenses::CreatedResponse;
use super::PeriodQuery;

#[derive(Debug, Serialize)]
pub struct IncomeListResponse {
    pub income: Vec<Income>,
    pub total: f64,
}

/// GET /api/income?month=&year= - List the month's income entries
pub async fn list_income(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<IncomeListResponse>, AppError> {
    let (month, year) = params.resolve()?;
    let income = state
        .db
        .list_income_for_month(user_id, month, year)
        .map_err(core_err)?;
    let total = income.iter().map(|i| i.amount).sum();

    Ok(Json(IncomeListResponse { income, total }))
}

/// POST /api/income - Record an income entry
pub async fn create_income(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(body): Json<NewIncome>,
) -> Result<Json<CreatedResponse>, AppError> {
    let id = state.db.add_income(user_id, &body).map_err(core_err)?;
    Ok(Json(CreatedResponse { success: true, id }))
}

/// DELETE /api/income/:id - Delete an income entry
pub async fn delete_income(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_income(user_id, id).map_err(core_err)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// GET /api/balance?month=&year= - Income/expense balance for the month
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<MonthlyBalance>, AppError> {
    let (month, year) = params.resolve()?;
    let balance = state
        .db
        .get_monthly_balance(user_id, month, year)
        .map_err(core_err)?;
    Ok(Json(balance))
}
