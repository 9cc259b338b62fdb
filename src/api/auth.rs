//! Admin account endpoints
//!
//! Handles signup, login/logout and principal introspection:
//! - POST /api/admin/signup - create an admin account
//! - POST /api/admin/login - decrypt-and-compare login, sets the token cookie
//! - POST /api/admin/logout - clears the cookie
//! - GET /api/admin/me - the resolved principal
//! - GET /api/admin - list admin accounts

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware as axum_middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::api::middleware::{require_admin, ApiError, AppState, AuthenticatedAdmin};
use crate::api::responses::Envelope;
use crate::models::Admin;
use crate::services::{AdminServiceError, SignupInput};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub username: Option<String>,
    pub password: String,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub fn router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/", get(list_admins))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .merge(protected)
}

/// POST /api/admin/signup
async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = body.email.clone();
    let password = body.password.clone();

    let admin = state
        .admin_service
        .signup(SignupInput {
            email: body.email,
            name: body.name,
            username: body.username,
            password: body.password,
            img: body.img,
            phone: body.phone,
        })
        .await
        .map_err(|e| match e {
            AdminServiceError::Validation(message) => ApiError::validation(message),
            AdminServiceError::AdminExists => ApiError::conflict("Admin already exists"),
            other => ApiError::Internal(anyhow::anyhow!(other)),
        })?;

    // Welcome mail is best-effort; account creation already succeeded.
    if state.email.is_enabled() {
        let username = admin.username.clone().unwrap_or_else(|| email.clone());
        if let Err(err) = state
            .email
            .send_signup_email(&email, &admin.name, &username, &password)
            .await
        {
            tracing::warn!(error = %err, "failed to send signup email");
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok("Admin created successfully", admin)),
    ))
}

/// POST /api/admin/login
async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (admin, token) = state
        .admin_service
        .login(&body.email, &body.password)
        .await
        .map_err(|e| match e {
            AdminServiceError::AdminNotFound => ApiError::unauthorized("Admin does not exist"),
            AdminServiceError::InvalidCredentials => ApiError::unauthorized("Invalid credentials"),
            other => ApiError::Internal(anyhow::anyhow!(other)),
        })?;

    // HTTP-only cookie carrying the token; Max-Age matches the token TTL.
    let cookie = format!(
        "token={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        token,
        state.tokens.ttl_seconds()
    );
    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("invalid cookie value: {}", e)))?,
    );

    Ok((
        headers,
        Json(Envelope::ok("Logged in successfully", admin)),
    ))
}

/// POST /api/admin/logout
async fn logout(_admin: AuthenticatedAdmin) -> impl IntoResponse {
    let clear_cookie = "token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0";
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, HeaderValue::from_static(clear_cookie));

    (
        headers,
        Json(Envelope::<()>::message_only("Logged out successfully")),
    )
}

/// GET /api/admin/me
async fn me(AuthenticatedAdmin(admin): AuthenticatedAdmin) -> Json<Envelope<Admin>> {
    Json(Envelope::ok("Data fetched successfully", admin))
}

/// GET /api/admin
async fn list_admins(
    State(state): State<AppState>,
    _admin: AuthenticatedAdmin,
) -> Result<Json<Envelope<Vec<Admin>>>, ApiError> {
    let admins = state
        .admin_service
        .list()
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;

    Ok(Json(Envelope::ok("Data fetched successfully", admins)))
}
