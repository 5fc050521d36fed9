//! Export and restore handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};

use fisc_core::{export_backup, export_expenses_csv, restore_backup, FullBackup, RestoreStats};

use crate::{core_err, AppError, AppState, CurrentUser};

use super::expenses::DateRangeQuery;

/// GET /api/export/transactions?from=&to= - Expense history as CSV
pub async fn export_transactions(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Query(params): Query<DateRangeQuery>,
) -> Result<Response, AppError> {
    let (from, to) = params.resolve()?;
    let bytes = export_expenses_csv(&state.db, user_id, from, to).map_err(core_err)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/export/full - Full JSON backup of the user's ledger
pub async fn export_full(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
) -> Result<Json<FullBackup>, AppError> {
    let backup = export_backup(&state.db, user_id).map_err(core_err)?;
    Ok(Json(backup))
}

/// POST /api/import/full - Restore a backup (additive)
pub async fn import_full(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user_id)): Extension<CurrentUser>,
    Json(backup): Json<FullBackup>,
) -> Result<Json<RestoreStats>, AppError> {
    let stats = restore_backup(&state.db, user_id, &backup).map_err(core_err)?;
    Ok(Json(stats))
}
