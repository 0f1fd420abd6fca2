use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::application::{AppError, BankService};
use crate::domain::{parse_cents, Cents};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    service: Arc<BankService>,
}

/// Error response carrying the HTTP status the error kind maps to.
/// Domain rejections keep their specific message; storage faults collapse
/// to a generic 500.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let status = match &err {
            AppError::AccountNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateAccount(_) => StatusCode::CONFLICT,
            AppError::DepositLimitExceeded { .. } => StatusCode::CONFLICT,
            AppError::InsufficientFunds { .. } => StatusCode::CONFLICT,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %err, "internal error");
            "internal error".to_string()
        } else {
            err.to_string()
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub first_name: String,
    pub last_name: String,
}

/// Amounts travel as decimal strings ("50.00") and are parsed to cents at
/// this boundary; the core never re-validates positivity.
#[derive(Deserialize)]
pub struct AmountRequest {
    pub amount: String,
}

#[derive(Deserialize)]
pub struct TransferRequest {
    pub from: String,
    pub to: String,
    pub amount: String,
}

fn parse_amount(raw: &str) -> Result<Cents, ApiError> {
    let cents = parse_cents(raw).map_err(|e| ApiError::bad_request(e.to_string()))?;
    if cents <= 0 {
        return Err(ApiError::bad_request("amount must be positive"));
    }
    Ok(cents)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/account
async fn create_account(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let view = state
        .service
        .create_account(&req.first_name, &req.last_name)
        .await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/account/:last_name
async fn account_by_last_name(
    State(state): State<AppState>,
    Path(last_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.account_by_last_name(&last_name).await?))
}

/// GET /api/account/first/:first_name
async fn account_by_first_name(
    State(state): State<AppState>,
    Path(first_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.account_by_first_name(&first_name).await?))
}

/// POST /api/account/deposit/:last_name
async fn deposit(
    State(state): State<AppState>,
    Path(last_name): Path<String>,
    Json(req): Json<AmountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let amount = parse_amount(&req.amount)?;
    Ok(Json(state.service.deposit(&last_name, amount).await?))
}

/// POST /api/account/withdraw/:last_name
async fn withdraw(
    State(state): State<AppState>,
    Path(last_name): Path<String>,
    Json(req): Json<AmountRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let amount = parse_amount(&req.amount)?;
    Ok(Json(state.service.withdraw(&last_name, amount).await?))
}

/// POST /api/account/transfer
async fn transfer(
    State(state): State<AppState>,
    Json(req): Json<TransferRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let amount = parse_amount(&req.amount)?;
    state.service.transfer(&req.from, &req.to, amount).await?;
    Ok(StatusCode::OK)
}

/// GET /api/account/transactions/:last_name
async fn latest_transactions(
    State(state): State<AppState>,
    Path(last_name): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.service.latest_transactions(&last_name).await?))
}

/// GET /api/health
async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// ============================================================================
// Router & server
// ============================================================================

/// Build the application router around a shared service.
pub fn router(service: Arc<BankService>) -> Router {
    let state = AppState { service };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/account", post(create_account))
        .route("/account/:last_name", get(account_by_last_name))
        .route("/account/first/:first_name", get(account_by_first_name))
        .route("/account/deposit/:last_name", post(deposit))
        .route("/account/withdraw/:last_name", post(withdraw))
        .route("/account/transfer", post(transfer))
        .route("/account/transactions/:last_name", get(latest_transactions))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

/// Bind the listener and serve the API until shutdown.
pub async fn serve(service: Arc<BankService>, addr: &str) -> anyhow::Result<()> {
    let app = router(service);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}
