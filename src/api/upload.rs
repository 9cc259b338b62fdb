//! Media upload endpoints
//!
//! The backend never proxies file bytes. POST issues a pre-signed PUT URL
//! the browser uploads to directly; DELETE removes an object by key. Both
//! are admin-only.

use axum::{
    extract::{Query, State},
    middleware as axum_middleware,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::middleware::{require_admin, ApiError, AppState, AuthenticatedAdmin};
use crate::api::responses::Envelope;

/// How long an issued upload URL stays valid.
const UPLOAD_URL_TTL_SECONDS: u64 = 15 * 60;

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    pub content_type: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    pub key: String,
}

#[derive(Debug, Serialize)]
pub struct UploadTicket {
    pub upload_url: String,
    pub key: String,
    pub public_url: String,
}

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(presign).delete(remove))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ))
}

/// POST /api/upload
async fn presign(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(body): Json<UploadRequest>,
) -> Result<Json<Envelope<UploadTicket>>, ApiError> {
    let storage = state
        .storage
        .as_ref()
        .ok_or_else(|| ApiError::validation("Object storage is not configured"))?;

    if body.filename.trim().is_empty() {
        return Err(ApiError::validation("Filename is required"));
    }
    if body.content_type.trim().is_empty() {
        return Err(ApiError::validation("Content type is required"));
    }

    let key = format!("uploads/{}-{}", Uuid::new_v4(), sanitize(&body.filename));
    let upload_url = storage
        .presign_put(&key, &body.content_type, UPLOAD_URL_TTL_SECONDS)
        .await
        .map_err(ApiError::Internal)?;

    let public_url = format!(
        "{}/{}",
        state.config.storage.public_base_url.trim_end_matches('/'),
        key
    );

    Ok(Json(Envelope::ok(
        "Upload URL issued successfully",
        UploadTicket {
            upload_url,
            key,
            public_url,
        },
    )))
}

/// DELETE /api/upload?key=
async fn remove(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Envelope<()>>, ApiError> {
    let storage = state
        .storage
        .as_ref()
        .ok_or_else(|| ApiError::validation("Object storage is not configured"))?;

    storage
        .delete_object(&query.key)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(Envelope::message_only("File deleted successfully")))
}

/// Object keys keep only a safe subset of the original filename.
fn sanitize(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_safe_characters_only() {
        assert_eq!(sanitize("team photo (1).png"), "team_photo__1_.png");
        assert_eq!(sanitize("logo.svg"), "logo.svg");
        assert_eq!(sanitize("../../etc/passwd"), ".._.._etc_passwd");
    }
}
