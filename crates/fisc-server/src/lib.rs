//! Fisc Web Server
//!
//! Axum-based REST API for the Fisc household budget manager.
//!
//! Security model:
//! - Token-based sessions: POST /api/auth/login returns a bearer token that
//!   protected routes require in the Authorization header
//! - Sessions live in process memory; restarting the server logs everyone out
//! - With `require_auth` disabled (local development and tests), the acting
//!   user is taken from the `x-fisc-user` header instead
//! - Restrictive CORS policy and sanitized error responses

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    extract::{Request, State},
    http::{header, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};

use fisc_core::db::Database;
use fisc_core::Error as CoreError;

mod handlers;

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
        }
    }
}

/// In-memory session table mapping bearer tokens to user ids
#[derive(Default)]
pub struct SessionStore {
    tokens: RwLock<HashMap<String, i64>>,
}

impl SessionStore {
    /// Issue a fresh token for a user
    pub fn create(&self, user_id: i64) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.tokens
            .write()
            .expect("session lock poisoned")
            .insert(token.clone(), user_id);
        token
    }

    /// Resolve a token to its user id
    pub fn get(&self, token: &str) -> Option<i64> {
        self.tokens
            .read()
            .expect("session lock poisoned")
            .get(token)
            .copied()
    }

    /// Drop a token (logout)
    pub fn remove(&self, token: &str) -> bool {
        self.tokens
            .write()
            .expect("session lock poisoned")
            .remove(token)
            .is_some()
    }
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    pub sessions: SessionStore,
}

/// The authenticated user for the current request
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub i64);

/// Authentication middleware
///
/// Resolves the acting user and stores it as a request extension. With auth
/// enabled that means a valid `Authorization: Bearer <token>` session; with
/// auth disabled the `x-fisc-user` header names the user directly.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        let username = request
            .headers()
            .get("x-fisc-user")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let user = match username {
            Some(name) => state.db.find_user(&name).ok().flatten(),
            None => None,
        };

        return match user {
            Some(user) => {
                request.extensions_mut().insert(CurrentUser(user.id));
                next.run(request).await
            }
            None => unauthorized("Set the x-fisc-user header to a registered username"),
        };
    }

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(str::trim);

    match token.and_then(|t| state.sessions.get(t)) {
        Some(user_id) => {
            request.extensions_mut().insert(CurrentUser(user_id));
            next.run(request).await
        }
        None => {
            warn!(path = %request.uri().path(), "Unauthorized request - no valid session");
            unauthorized("Authentication required")
        }
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({ "error": message })),
    )
        .into_response()
}

/// Build the application router
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        sessions: SessionStore::default(),
    });

    // Routes reachable without a session
    let public_routes = Router::new()
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login));

    // Everything else requires the auth middleware
    let protected_routes = Router::new()
        .route("/auth/logout", post(handlers::logout))
        // Taxonomy
        .route("/categories", get(handlers::get_categories))
        // Expenses
        .route(
            "/expenses",
            get(handlers::list_expenses).post(handlers::create_expense),
        )
        .route("/expenses/:id", delete(handlers::delete_expense))
        // Income
        .route(
            "/income",
            get(handlers::list_income).post(handlers::create_income),
        )
        .route("/income/:id", delete(handlers::delete_income))
        .route("/balance", get(handlers::get_balance))
        // Budget plans
        .route(
            "/budget",
            get(handlers::get_budget_plan).post(handlers::set_budget),
        )
        .route("/budget/copy", post(handlers::copy_budget))
        // Analytics
        .route("/reports/budget", get(handlers::report_budget))
        .route("/insights/forecast", get(handlers::forecast))
        .route("/insights/anomalies", get(handlers::anomalies))
        .route("/insights/recommendations", get(handlers::recommendations))
        // Export
        .route("/export/transactions", get(handlers::export_transactions))
        .route("/export/full", get(handlers::export_full))
        .route("/import/full", post(handlers::import_full))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = public_routes.merge(protected_routes);

    // Build CORS layer
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<axum::http::HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    Router::new()
        .nest("/api", api_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Start the server with the default configuration
pub async fn serve(db: Database, host: &str, port: u16) -> anyhow::Result<()> {
    serve_with_config(db, host, port, ServerConfig::default()).await
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    }

    let app = create_router(db, config);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Error Handling
// ============================================================================

/// Simple success body for mutations
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Application error type with proper HTTP status codes
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unauthorized(msg: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Return generic message to client
            message: "An internal error occurred".to_string(),
            // Keep full error for logging
            internal: Some(err),
        }
    }
}

/// Map core ledger errors onto client-facing status codes
pub(crate) fn core_err(err: CoreError) -> AppError {
    match err {
        CoreError::InvalidCategory(msg) => {
            AppError::bad_request(&format!("Unknown category: {}", msg))
        }
        CoreError::InvalidData(msg) => AppError::bad_request(&msg),
        CoreError::NotFound(msg) => AppError::not_found(&msg),
        CoreError::Conflict(msg) => AppError::conflict(&msg),
        CoreError::Auth(msg) => AppError::unauthorized(&msg),
        other => other.into(),
    }
}
