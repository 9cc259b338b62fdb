//! API layer - HTTP handlers and routing
//!
//! One module per resource family plus the shared middleware and response
//! types. `build_router` assembles the full `/api` surface: public reads
//! and form submissions, auth-gated admin mutations, CORS configured for
//! cookie credentials.

pub mod about;
pub mod addresses;
pub mod auth;
pub mod contact;
pub mod industries;
pub mod middleware;
pub mod quotes;
pub mod resources;
pub mod responses;
pub mod upload;


use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, AuthenticatedAdmin};
pub use responses::Envelope;

use crate::models::{Banner, Career, ContentBlock, GalleryItem, Project, ServiceItem, Slider, TeamMember};

/// Build the `/api` router.
pub fn build_api_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/admin", auth::router(state))
        .nest("/about", about::router(state))
        .nest("/address", addresses::router(state))
        .nest("/banner", resources::router::<Banner>(state))
        .nest("/career", resources::router::<Career>(state))
        .nest("/content", resources::router::<ContentBlock>(state))
        .nest("/gallery", resources::router::<GalleryItem>(state))
        .nest("/industry", industries::router(state))
        .nest("/project", resources::router::<Project>(state))
        .nest("/service", resources::router::<ServiceItem>(state))
        .nest("/slider", resources::router::<Slider>(state))
        .nest("/team", resources::router::<TeamMember>(state))
        .nest("/gaq", quotes::router(state))
        .nest("/contact", contact::router())
        .nest("/upload", upload::router(state))
        .route("/health", get(|| async { "ok" }))
}

/// Build the complete router with middleware.
pub fn build_router(state: AppState) -> Router {
    // Cookie auth needs an exact origin and credentials.
    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .cors_origin
                .parse::<HeaderValue>()
                .expect("CORS_ORIGIN must be a valid header value"),
        )
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        .nest("/api", build_api_router(&state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
