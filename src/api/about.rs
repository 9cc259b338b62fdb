//! About page endpoints
//!
//! The about document is a singleton, so the routes differ from the generic
//! content shape: GET returns the one document (or none), POST creates it
//! exactly once, PUT updates it without an id.

use axum::{
    extract::State,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};

use crate::api::middleware::{require_admin, ApiError, AppState, AuthenticatedAdmin};
use crate::api::resources::CreateBody;
use crate::api::responses::{ContentView, Envelope};
use crate::db::repositories::{KindSpec, NewContent, UpdateContent};
use crate::models::content::Resource;
use crate::models::About;

pub fn router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create).put(update))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new().route("/", get(get_about)).merge(protected)
}

/// GET /api/about
async fn get_about(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Option<ContentView>>>, ApiError> {
    let records = state
        .content_repo
        .list(&KindSpec::of::<About>(), false)
        .await?;

    let view = records.into_iter().next().map(ContentView::from);
    Ok(Json(Envelope::ok("Data fetched successfully", view)))
}

/// POST /api/about
async fn create(
    State(state): State<AppState>,
    AuthenticatedAdmin(admin): AuthenticatedAdmin,
    Json(body): Json<CreateBody<About>>,
) -> Result<(StatusCode, Json<Envelope<ContentView>>), ApiError> {
    About::validate(&body.payload).map_err(ApiError::validation)?;

    let data = serde_json::to_value(&body.payload).map_err(|e| ApiError::Internal(e.into()))?;

    let record = state
        .content_repo
        .create(
            &KindSpec::of::<About>(),
            NewContent {
                slug: None,
                data,
                active: body.active,
                display_order: body.display_order,
                author_id: admin.id,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("About created successfully", record.into())),
    ))
}

/// PUT /api/about — no id: there is at most one document to update.
async fn update(
    State(state): State<AppState>,
    AuthenticatedAdmin(admin): AuthenticatedAdmin,
    Json(body): Json<CreateBody<About>>,
) -> Result<Json<Envelope<ContentView>>, ApiError> {
    About::validate(&body.payload).map_err(ApiError::validation)?;

    let data = serde_json::to_value(&body.payload).map_err(|e| ApiError::Internal(e.into()))?;

    let record = state
        .content_repo
        .update_singleton(
            &KindSpec::of::<About>(),
            UpdateContent {
                slug: None,
                data,
                active: Some(body.active),
                display_order: None,
                editor_id: admin.id,
            },
        )
        .await?;

    Ok(Json(Envelope::ok("About updated successfully", record.into())))
}
