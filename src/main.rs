//! Atrium - content management backend for the Atrium corporate website

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atrium::{
    api::{self, AppState},
    config::AppConfig,
    db::{
        self,
        repositories::{SqlxAdminRepository, SqlxContentRepository, SqlxQuoteRepository},
    },
    services::{AdminService, CredentialCodec, EmailService, TokenService},
    storage::{S3Storage, StorageClient},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atrium=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Atrium backend...");

    // Configuration is read once; everything downstream takes it by Arc.
    let config = Arc::new(AppConfig::from_env()?);
    tracing::info!("Configuration loaded");

    let pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Database connected");

    db::migrations::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    let codec = CredentialCodec::new(&config.credential_secret);
    let tokens = Arc::new(TokenService::new(&config.token));

    let admin_repo = SqlxAdminRepository::boxed(pool.clone());
    let content_repo = SqlxContentRepository::boxed(pool.clone());
    let quote_repo = SqlxQuoteRepository::boxed(pool.clone());

    let admin_service = Arc::new(AdminService::new(admin_repo, codec, tokens.clone()));
    let email = Arc::new(EmailService::new(
        config.smtp.clone(),
        config.public_base_url.clone(),
    ));
    if !email.is_enabled() {
        tracing::warn!("SMTP is not configured; transactional mail is disabled");
    }

    let storage: Option<Arc<dyn StorageClient>> = if config.storage.bucket.is_empty() {
        tracing::warn!("Object storage is not configured; uploads are disabled");
        None
    } else {
        Some(Arc::new(S3Storage::new(&config.storage).await?))
    };

    let state = AppState {
        pool,
        config: config.clone(),
        admin_service,
        tokens,
        content_repo,
        quote_repo,
        email,
        storage,
    };

    let app = api::build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
