//! Session handlers: register, login, logout

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{core_err, AppError, AppState, SuccessResponse};

/// Request body for registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
}

/// Response for registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub user_id: i64,
}

/// Request body for login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: i64,
    pub username: String,
}

/// POST /api/auth/register - Create a user account
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let user_id = state
        .db
        .register_user(&body.username, &body.password, body.email.as_deref())
        .map_err(core_err)?;

    info!(username = %body.username, user_id, "Registered user via API");
    Ok(Json(RegisterResponse {
        success: true,
        user_id,
    }))
}

/// POST /api/auth/login - Exchange credentials for a session token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state
        .db
        .login_user(&body.username, &body.password)
        .map_err(core_err)?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

    let token = state.sessions.create(user.id);
    info!(username = %user.username, "Session created");

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        username: user.username,
    }))
}

/// POST /api/auth/logout - Invalidate the current session token
pub async fn logout(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim);

    if let Some(token) = token {
        state.sessions.remove(token);
    }

    Ok(Json(SuccessResponse { success: true }))
}
