//! Generic content routes
//!
//! One set of handlers serves every content kind; `router::<R>()`
//! instantiates them for a kind and nests under its path. Reads are public,
//! writes sit behind the auth gate, and the acting admin resolved by the
//! gate is what gets stamped into the authorship columns — ids in request
//! bodies are never trusted for that.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{require_admin, ApiError, AppState, AuthenticatedAdmin};
use crate::api::responses::{ContentView, Envelope};
use crate::db::repositories::{KindSpec, NewContent, UpdateContent};
use crate::models::content::Resource;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// `?active=true` narrows to active records; default is all.
    #[serde(default)]
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: i64,
}

/// Create body: record-level knobs plus the kind's own fields.
#[derive(Debug, Deserialize)]
pub struct CreateBody<P> {
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub display_order: i64,
    #[serde(flatten)]
    pub payload: P,
}

/// Update body: the target id, optional record-level knobs, and a full
/// replacement payload.
#[derive(Debug, Deserialize)]
pub struct UpdateBody<P> {
    pub id: i64,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub display_order: Option<i64>,
    #[serde(flatten)]
    pub payload: P,
}

fn default_true() -> bool {
    true
}

pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<ContentView>>>, ApiError> {
    let records = state
        .content_repo
        .list(&KindSpec::of::<R>(), query.active.unwrap_or(false))
        .await?;

    let views = records.into_iter().map(ContentView::from).collect();
    Ok(Json(Envelope::ok("Data fetched successfully", views)))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    AuthenticatedAdmin(admin): AuthenticatedAdmin,
    Json(body): Json<CreateBody<R::Payload>>,
) -> Result<(StatusCode, Json<Envelope<ContentView>>), ApiError> {
    R::validate(&body.payload).map_err(ApiError::validation)?;

    let data = serde_json::to_value(&body.payload)
        .map_err(|e| ApiError::Internal(e.into()))?;

    let record = state
        .content_repo
        .create(
            &KindSpec::of::<R>(),
            NewContent {
                slug: R::slug(&body.payload),
                data,
                active: body.active,
                display_order: body.display_order,
                author_id: admin.id,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            format!("{} created successfully", R::LABEL),
            record.into(),
        )),
    ))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    AuthenticatedAdmin(admin): AuthenticatedAdmin,
    Json(body): Json<UpdateBody<R::Payload>>,
) -> Result<Json<Envelope<ContentView>>, ApiError> {
    R::validate(&body.payload).map_err(ApiError::validation)?;

    let data = serde_json::to_value(&body.payload)
        .map_err(|e| ApiError::Internal(e.into()))?;

    let record = state
        .content_repo
        .update(
            &KindSpec::of::<R>(),
            body.id,
            UpdateContent {
                slug: R::slug(&body.payload),
                data,
                active: body.active,
                display_order: body.display_order,
                editor_id: admin.id,
            },
        )
        .await?;

    Ok(Json(Envelope::ok(
        format!("{} updated successfully", R::LABEL),
        record.into(),
    )))
}

pub async fn remove<R: Resource>(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Query(query): Query<IdQuery>,
) -> Result<Json<Envelope<()>>, ApiError> {
    state
        .content_repo
        .delete(&KindSpec::of::<R>(), query.id)
        .await?;

    Ok(Json(Envelope::message_only(format!(
        "{} deleted successfully",
        R::LABEL
    ))))
}

/// Standard router for a content kind: public list, gated writes.
pub fn router<R: Resource>(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/",
            post(create::<R>).put(update::<R>).delete(remove::<R>),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new().route("/", get(list::<R>)).merge(protected)
}
