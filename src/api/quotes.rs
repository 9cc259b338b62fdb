//! Quote request (get-a-quote) endpoints
//!
//! - POST /api/gaq - public submission, validated, notifications best-effort
//! - GET /api/gaq - admin listing; `?stats=true` returns per-status counts
//! - PUT /api/gaq - admin status transition `{id, status}`
//! - DELETE /api/gaq?id= - admin removal

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware as axum_middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::str::FromStr;

use crate::api::middleware::{require_admin, ApiError, AppState, AuthenticatedAdmin};
use crate::api::resources::IdQuery;
use crate::api::responses::Envelope;
use crate::models::{validate, NewQuote, QuoteRequest, QuoteStatus};

#[derive(Debug, Deserialize)]
struct GaqListQuery {
    #[serde(default)]
    stats: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct StatusUpdateRequest {
    id: i64,
    status: String,
}

pub fn router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list).put(update_status).delete(remove))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new().route("/", post(submit)).merge(protected)
}

/// POST /api/gaq
async fn submit(
    State(state): State<AppState>,
    Json(body): Json<NewQuote>,
) -> Result<(StatusCode, Json<Envelope<QuoteRequest>>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    if !validate::is_valid_email(&body.email) {
        return Err(ApiError::validation("Invalid email address"));
    }
    if !validate::is_valid_phone(&body.phone) {
        return Err(ApiError::validation("Invalid phone number"));
    }
    if body.message.trim().is_empty() {
        return Err(ApiError::validation("Message is required"));
    }

    let quote = state.quote_repo.create(&body).await?;

    // The stored request is the source of truth; mail is best-effort.
    if state.email.is_enabled() {
        if let Err(err) = state
            .email
            .send_quote_notification(
                &quote.name,
                &quote.email,
                &quote.phone,
                quote.service.as_deref(),
                &quote.message,
            )
            .await
        {
            tracing::warn!(error = %err, "failed to send quote notification");
        }
        if let Err(err) = state
            .email
            .send_quote_confirmation(&quote.email, &quote.name)
            .await
        {
            tracing::warn!(error = %err, "failed to send quote confirmation");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Quote request submitted successfully", quote)),
    ))
}

/// GET /api/gaq — listing, or stats with `?stats=true`.
async fn list(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<GaqListQuery>,
) -> Result<Response, ApiError> {
    if query.stats.unwrap_or(false) {
        let stats = state.quote_repo.stats().await?;
        return Ok(Json(Envelope::ok("Data fetched successfully", stats)).into_response());
    }

    let quotes = state.quote_repo.list().await?;
    Ok(Json(Envelope::ok("Data fetched successfully", quotes)).into_response())
}

/// PUT /api/gaq
async fn update_status(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<StatusUpdateRequest>,
) -> Result<Json<Envelope<QuoteRequest>>, ApiError> {
    let status = QuoteStatus::from_str(&body.status)
        .map_err(|_| ApiError::validation(format!("Invalid status: {}", body.status)))?;

    let quote = state.quote_repo.update_status(body.id, status).await?;
    Ok(Json(Envelope::ok("Quote request updated successfully", quote)))
}

/// DELETE /api/gaq?id=
async fn remove(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<IdQuery>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state.quote_repo.delete(query.id).await?;
    Ok(Json(Envelope::message_only("Quote request deleted successfully")))
}
