//! API middleware
//!
//! Shared application state, the API error type, and the authentication
//! gate guarding every admin mutation. The gate is one reusable middleware:
//! cookie → token verification → principal resolution, rejecting with 401
//! before any handler or repository runs if any step fails.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::api::responses::Envelope;
use crate::config::AppConfig;
use crate::db::repositories::{ContentRepository, QuoteRepository, StoreError};
use crate::models::Admin;
use crate::services::{AdminService, AdminServiceError, EmailService, TokenService};
use crate::storage::StorageClient;

/// Application state containing shared services.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<AppConfig>,
    pub admin_service: Arc<AdminService>,
    pub tokens: Arc<TokenService>,
    pub content_repo: Arc<dyn ContentRepository>,
    pub quote_repo: Arc<dyn QuoteRepository>,
    pub email: Arc<EmailService>,
    /// Absent when no bucket is configured; the upload routes report that.
    pub storage: Option<Arc<dyn StorageClient>>,
}

/// The admin resolved by the auth gate, available to handlers behind it.
#[derive(Debug, Clone)]
pub struct AuthenticatedAdmin(pub Admin);

impl<S> FromRequestParts<S> for AuthenticatedAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAdmin>()
            .cloned()
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// API failure taxonomy. One `IntoResponse` impl maps each variant to its
/// HTTP status and the uniform `{success:false, message}` envelope.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure; the cause is logged, the client gets a generic
    /// message.
    #[error("Something went wrong, please try again after sometime")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(message) => ApiError::NotFound(message),
            StoreError::Duplicate(message) | StoreError::Conflict(message) => {
                ApiError::Conflict(message)
            }
            StoreError::Other(err) => ApiError::Internal(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(Envelope::<()>::fail(self.to_string()))).into_response()
    }
}

/// Extract the session token from the `token` cookie, falling back to a
/// bearer Authorization header.
fn extract_token(request: &Request) -> Option<String> {
    if let Some(cookie_header) = request.headers().get(header::COOKIE) {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(token) = cookie.strip_prefix("token=") {
                    return Some(token.to_string());
                }
            }
        }
    }

    if let Some(auth_header) = request.headers().get(header::AUTHORIZATION) {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.to_string());
            }
        }
    }

    None
}

/// Authentication gate for admin mutations.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(&request)
        .ok_or_else(|| ApiError::unauthorized("Missing authentication token"))?;

    let claims = state
        .tokens
        .verify(&token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;

    // A valid token does not imply the admin still exists.
    let admin = state
        .admin_service
        .resolve(&claims.email)
        .await
        .map_err(|e| match e {
            AdminServiceError::AdminNotFound => ApiError::unauthorized("Admin does not exist"),
            other => ApiError::Internal(anyhow::anyhow!(other)),
        })?;

    request.extensions_mut().insert(AuthenticatedAdmin(admin));
    Ok(next.run(request).await)
}
