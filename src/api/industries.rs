//! Industry endpoints
//!
//! Industries and their categories share this router:
//! - GET/POST/PUT/DELETE /api/industry - industry CRUD
//! - GET/POST/PUT/DELETE /api/industry/category - category CRUD
//! - GET /api/industry/detail/{slug} - public industry detail
//! - GET /api/industry/{category} - public industries of one category
//!
//! Static segments win over the `{category}` capture, so `/category` and
//! `/detail/...` stay addressable.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use crate::api::middleware::{ApiError, AppState};
use crate::api::resources::{self, ListQuery};
use crate::api::responses::{ContentView, Envelope};
use crate::db::repositories::KindSpec;
use crate::models::{Industry, IndustryCategory};

pub fn router(state: &AppState) -> Router<AppState> {
    resources::router::<Industry>(state)
        .nest("/category", resources::router::<IndustryCategory>(state))
        .route("/detail/{slug}", get(detail_by_slug))
        .route("/{category}", get(list_by_category))
}

/// GET /api/industry/detail/{slug}
async fn detail_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Envelope<ContentView>>, ApiError> {
    let record = state
        .content_repo
        .get_by_slug(&KindSpec::of::<Industry>(), &slug)
        .await?;

    Ok(Json(Envelope::ok("Data fetched successfully", record.into())))
}

/// GET /api/industry/{category}
async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<ContentView>>>, ApiError> {
    let records = state
        .content_repo
        .list_by_field(
            &KindSpec::of::<Industry>(),
            "category",
            &category,
            query.active.unwrap_or(false),
        )
        .await?;

    let views = records.into_iter().map(ContentView::from).collect();
    Ok(Json(Envelope::ok("Data fetched successfully", views)))
}
