//! API request handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::access::{AccessController, UsageDecision};
use crate::api::Metrics;
use crate::config::BillingConfig;
use crate::error::ForgeError;
use crate::generator;
use crate::session::SessionTokens;
use crate::store::{Account, AccountStore};

/// Shared application state
pub struct AppState {
    pub store: Arc<AccountStore>,
    pub access: AccessController,
    pub tokens: SessionTokens,
    pub metrics: Metrics,
    pub billing: BillingConfig,
}

/// Registration request body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Generation request body; the session token is optional and rides in the
/// body, not a header
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(rename = "type", default)]
    pub product_type: String,
    #[serde(default)]
    pub idea: String,
    #[serde(default)]
    pub token: Option<String>,
}

/// Public account summary (no credential material)
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub name: String,
    pub email: String,
    #[serde(rename = "productsCount")]
    pub products_count: u32,
    #[serde(rename = "isSubscriber")]
    pub is_subscriber: bool,
}

impl From<Account> for UserSummary {
    fn from(account: Account) -> Self {
        UserSummary {
            name: account.name,
            email: account.email,
            products_count: account.products_count,
            is_subscriber: account.is_subscriber,
        }
    }
}

/// Register/login response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

/// Successful generation response
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub text: String,
    #[serde(rename = "productsLeft")]
    pub products_left: u32,
    #[serde(rename = "isSubscriber")]
    pub is_subscriber: bool,
}

/// Quota-exhausted payload, returned with a success status; callers inspect
/// the `error` field rather than the transport status
#[derive(Debug, Serialize)]
pub struct ExhaustedResponse {
    pub error: &'static str,
    pub text: &'static str,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(msg: &str) -> Self {
        Self {
            error: msg.to_string(),
        }
    }
}

/// POST /api/register - Create an account and get a session token
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    state.metrics.inc_requests();

    match state.store.register(&req.name, &req.email, &req.password).await {
        Ok(account) => match state.tokens.issue(&account.email) {
            Ok(token) => {
                state.metrics.inc_registrations();
                (
                    StatusCode::OK,
                    Json(AuthResponse {
                        token,
                        user: account.into(),
                    }),
                )
                    .into_response()
            }
            Err(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Failed to create token")),
            )
                .into_response(),
        },
        Err(ForgeError::InvalidInput(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("Email and password required")),
        )
            .into_response(),
        Err(ForgeError::AlreadyExists) => (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("User exists")),
        )
            .into_response(),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiError::new("Registration error")),
        )
            .into_response(),
    }
}

/// POST /api/login - Authenticate and get a session token
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    state.metrics.inc_requests();
    state.metrics.inc_auth_attempts();

    match state.store.authenticate(&req.email, &req.password).await {
        Ok(account) => match state.tokens.issue(&account.email) {
            Ok(token) => (
                StatusCode::OK,
                Json(AuthResponse {
                    token,
                    user: account.into(),
                }),
            )
                .into_response(),
            Err(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("Failed to create token")),
            )
                .into_response(),
        },
        Err(_) => {
            state.metrics.inc_auth_failures();
            (
                StatusCode::BAD_REQUEST,
                Json(ApiError::new("Invalid credentials")),
            )
                .into_response()
        }
    }
}

/// POST /api/generate - Generate a product, metered against the free quota
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateRequest>,
) -> impl IntoResponse {
    state.metrics.inc_requests();

    match state.access.request_usage(req.token.as_deref()).await {
        UsageDecision::Allowed {
            remaining,
            is_subscriber,
        } => {
            state.metrics.inc_generations();
            (
                StatusCode::OK,
                Json(GenerateResponse {
                    text: generator::render(&req.product_type, &req.idea),
                    products_left: remaining,
                    is_subscriber,
                }),
            )
                .into_response()
        }
        UsageDecision::Denied { .. } => {
            info!("Generation denied: free tier exhausted");
            state.metrics.inc_quota_denials();
            (
                StatusCode::OK,
                Json(ExhaustedResponse {
                    error: "free_exhausted",
                    text: generator::denial_message(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health - Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.metrics.inc_requests();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": "forge-rs",
            "version": env!("CARGO_PKG_VERSION"),
            "accounts": state.store.count().await,
            "uptime_seconds": state.metrics.uptime_seconds(),
        })),
    )
}

/// GET /metrics - Prometheus metrics endpoint
pub async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        state.metrics.to_prometheus(),
    )
}
