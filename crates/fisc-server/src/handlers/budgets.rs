//! Budget plan and taxonomy handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use fisc_core::models::BudgetEntry;
use fisc_core::TAXONOMY;

use crate::{core_err, AppError, AppState, CurrentUser};

use super::PeriodQuery;

#[derive(Debug, Serialize)]
pub struct BudgetPlanResponse {
    pub month: u32,
    pub year: i32,
    pub entries: Vec<BudgetEntry>,
    pub total_planned: f64,
}

/// Request body for setting a budget line
#[derive(Debug, Deserialize)]
pub struct SetBudgetRequest {
    pub category: String,
    pub subcategory: String,
    pub planned_amount: f64,
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct SetBudgetResponse {
    pub success: bool,
    pub id: i64,
}

/// Request body for copying a plan forward
#[derive(Debug, Deserialize)]
pub struct CopyBudgetRequest {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Serialize)]
pub struct CopyBudgetResponse {
    pub success: bool,
    pub copied: usize,
}

/// One category with its display metadata and subcategories
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub name: String,
    pub color: String,
    pub icon: String,
    pub subcategories: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub categories: Vec<CategoryResponse>,
    pub income_sources: Vec<String>,
}

/// GET /api/budget?month=&year= - The month's budget plan
pub async fn get_budget_plan(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<PeriodQuery>,
) -> Result<Json<BudgetPlanResponse>, AppError> {
    let (month, year) = params.resolve()?;
    let entries = state
        .db
        .get_budget_plan(user_id, month, year)
        .map_err(core_err)?;
    let total_planned = entries.iter().map(|e| e.planned_amount).sum();

    Ok(Json(BudgetPlanResponse {
        month,
        year,
        entries,
        total_planned,
    }))
}

/// POST /api/budget - Set one budget line (upsert)
pub async fn set_budget(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(body): Json<SetBudgetRequest>,
) -> Result<Json<SetBudgetResponse>, AppError> {
    let id = state
        .db
        .set_budget(
            user_id,
            &body.category,
            &body.subcategory,
            body.planned_amount,
            body.month,
            body.year,
        )
        .map_err(core_err)?;

    Ok(Json(SetBudgetResponse { success: true, id }))
}

/// POST /api/budget/copy - Copy a month's plan to the following month
pub async fn copy_budget(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(body): Json<CopyBudgetRequest>,
) -> Result<Json<CopyBudgetResponse>, AppError> {
    if !(1..=12).contains(&body.month) {
        return Err(AppError::bad_request("Month must be between 1 and 12"));
    }
    let copied = state
        .db
        .copy_budget_to_next_month(user_id, body.month, body.year)
        .map_err(core_err)?;

    Ok(Json(CopyBudgetResponse {
        success: true,
        copied,
    }))
}

/// GET /api/categories - The fixed category taxonomy
pub async fn get_categories() -> Json<TaxonomyResponse> {
    let categories = TAXONOMY
        .categories()
        .filter_map(|name| {
            TAXONOMY.category_info(name).map(|info| CategoryResponse {
                name: name.to_string(),
                color: info.color.to_string(),
                icon: info.icon.to_string(),
                subcategories: info
                    .subcategories
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            })
        })
        .collect();

    Json(TaxonomyResponse {
        categories,
        income_sources: TAXONOMY
            .income_sources()
            .iter()
            .map(|s| s.to_string())
            .collect(),
    })
}
