//! Contact form endpoint
//!
//! Submissions are not persisted; a valid message turns into two emails —
//! a notification to the site inbox and a confirmation to the sender. The
//! notification is the one that matters: if it cannot be sent the caller
//! gets a failure envelope, while a lost confirmation only logs.

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;

use crate::api::middleware::{ApiError, AppState};
use crate::api::responses::Envelope;
use crate::models::validate;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit))
}

/// POST /api/contact
async fn submit(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    if !validate::is_valid_email(&body.email) {
        return Err(ApiError::validation("Invalid email address"));
    }
    if let Some(phone) = &body.phone {
        if !phone.is_empty() && !validate::is_valid_phone(phone) {
            return Err(ApiError::validation("Invalid phone number"));
        }
    }
    if body.message.trim().is_empty() {
        return Err(ApiError::validation("Message is required"));
    }

    state
        .email
        .send_contact_notification(
            &body.name,
            &body.email,
            body.phone.as_deref(),
            &body.message,
        )
        .await
        .map_err(ApiError::Internal)?;

    if let Err(err) = state
        .email
        .send_contact_confirmation(&body.email, &body.name)
        .await
    {
        tracing::warn!(error = %err, "failed to send contact confirmation");
    }

    Ok(Json(Envelope::message_only("Message sent successfully")))
}
