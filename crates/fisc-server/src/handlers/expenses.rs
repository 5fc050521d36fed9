//! Expense handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use fisc_core::models::{Expense, NewExpense};

use crate::{core_err, AppError, AppState, CurrentUser, SuccessResponse};

use super::PeriodQuery;

#[derive(Debug, Serialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<Expense>,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

/// GET /api/expenses?month=&year= - List the month's expenses
pub async fn list_expenses(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<ExpenseListResponse>, AppError> {
    let (month, year) = params.resolve()?;
    let expenses = state
        .db
        .list_expenses_for_month(user_id, month, year)
        .map_err(core_err)?;
    let total = expenses.iter().map(|e| e.amount).sum();

    Ok(Json(ExpenseListResponse { expenses, total }))
}

/// POST /api/expenses - Record an expense
pub async fn create_expense(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(body): Json<NewExpense>,
) -> Result<Json<CreatedResponse>, AppError> {
    let id = state.db.add_expense(user_id, &body).map_err(core_err)?;
    Ok(Json(CreatedResponse { success: true, id }))
}

/// DELETE /api/expenses/:id - Delete an expense
pub async fn delete_expense(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.db.delete_expense(user_id, id).map_err(core_err)?;
    Ok(Json(SuccessResponse { success: true }))
}

/// Date-range query for exports and listings
#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl DateRangeQuery {
    pub fn resolve(
        &self,
    ) -> Result<(Option<chrono::NaiveDate>, Option<chrono::NaiveDate>), AppError> {
        let parse = |value: &Option<String>| -> Result<Option<chrono::NaiveDate>, AppError> {
            value
                .as_deref()
                .map(|s| {
                    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
                        .map_err(|_| AppError::bad_request("Invalid date format (use YYYY-MM-DD)"))
                })
                .transpose()
        };
        Ok((parse(&self.from)?, parse(&self.to)?))
    }
}
