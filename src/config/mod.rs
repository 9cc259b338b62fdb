//! Application configuration
//!
//! All configuration is read from the environment exactly once at startup
//! (`AppConfig::from_env`) and shared through `AppState`. Individual modules
//! never read environment variables themselves.

use serde::Deserialize;

/// Session token settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenConfig {
    /// HMAC secret the tokens are signed with.
    pub secret: String,
    /// Token (and cookie) lifetime in days.
    pub ttl_days: i64,
}

/// SMTP settings for outbound mail. An empty `host` disables sending.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
    pub from_name: String,
    /// Inbox that receives contact/quote notifications.
    pub notify_address: String,
}

impl SmtpConfig {
    /// Whether outbound mail is configured at all.
    pub fn is_enabled(&self) -> bool {
        !self.host.is_empty()
    }
}

/// Object storage settings for pre-signed uploads. An empty `bucket`
/// disables the upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub endpoint: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    /// Base URL media objects are served from after upload.
    pub public_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Secret the reversible credential codec derives its key from.
    pub credential_secret: String,
    pub token: TokenConfig,
    pub smtp: SmtpConfig,
    pub storage: StorageConfig,
    /// Origin allowed by CORS (cookie auth needs an exact origin).
    pub cors_origin: String,
    /// Public URL of the site, used in email bodies.
    pub public_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let token = TokenConfig {
            secret: std::env::var("TOKEN_SECRET")?,
            ttl_days: std::env::var("TOKEN_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(7),
        };
        let smtp = SmtpConfig {
            host: env_or_default("SMTP_HOST", ""),
            port: std::env::var("SMTP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(587),
            username: env_or_default("SMTP_USERNAME", ""),
            password: env_or_default("SMTP_PASSWORD", ""),
            from_address: env_or_default("SMTP_FROM", ""),
            from_name: env_or_default("SMTP_FROM_NAME", "Atrium"),
            notify_address: env_or_default("SMTP_NOTIFY_ADDRESS", ""),
        };
        let storage = StorageConfig {
            endpoint: env_or_default("S3_ENDPOINT", ""),
            bucket: env_or_default("S3_BUCKET", ""),
            access_key: env_or_default("S3_ACCESS_KEY", ""),
            secret_key: env_or_default("S3_SECRET_KEY", ""),
            region: env_or_default("S3_REGION", "us-east-1"),
            public_base_url: env_or_default("S3_PUBLIC_BASE_URL", ""),
        };
        Ok(Self {
            host: env_or_default("APP_HOST", "0.0.0.0"),
            port: std::env::var("APP_PORT")
                .ok()
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            database_url: env_or_default("DATABASE_URL", "data/atrium.db"),
            credential_secret: std::env::var("CREDENTIAL_SECRET")?,
            token,
            smtp,
            storage,
            cors_origin: env_or_default("CORS_ORIGIN", "http://localhost:3000"),
            public_base_url: env_or_default("PUBLIC_BASE_URL", "http://localhost:3000"),
        })
    }
}

fn env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
pub fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".into(),
        port: 0,
        database_url: ":memory:".into(),
        credential_secret: "test-credential-secret".into(),
        token: TokenConfig {
            secret: "test-token-secret".into(),
            ttl_days: 7,
        },
        smtp: SmtpConfig {
            host: String::new(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from_address: String::new(),
            from_name: "Atrium".into(),
            notify_address: String::new(),
        },
        storage: StorageConfig {
            endpoint: String::new(),
            bucket: String::new(),
            access_key: String::new(),
            secret_key: String::new(),
            region: "us-east-1".into(),
            public_base_url: String::new(),
        },
        cors_origin: "http://localhost:3000".into(),
        public_base_url: "http://localhost:3000".into(),
    }
}
