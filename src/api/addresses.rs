//! Office address endpoints
//!
//! Standard content CRUD plus the display-order rewrite:
//! PUT /api/address/order takes `[{id, display_order}]` and applies the
//! whole batch in one transaction.

use axum::{
    extract::State, middleware as axum_middleware, routing::put, Json, Router,
};

use crate::api::middleware::{require_admin, ApiError, AppState, AuthenticatedAdmin};
use crate::api::resources;
use crate::api::responses::Envelope;
use crate::db::repositories::{DisplayOrderUpdate, KindSpec};
use crate::models::Address;

pub fn router(state: &AppState) -> Router<AppState> {
    let order = Router::new()
        .route("/order", put(set_order))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    resources::router::<Address>(state).merge(order)
}

/// PUT /api/address/order
async fn set_order(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
    Json(orders): Json<Vec<DisplayOrderUpdate>>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if orders.is_empty() {
        return Err(ApiError::validation("Order list must not be empty"));
    }

    state
        .content_repo
        .set_display_order(&KindSpec::of::<Address>(), &orders)
        .await?;

    Ok(Json(Envelope::message_only("Display order updated successfully")))
}
