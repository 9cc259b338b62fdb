//! Database connection pool
//!
//! Creates the SQLite pool the whole application shares. File-based
//! databases get their parent directory created and `mode=rwc` so a first
//! run starts from nothing; in-memory databases are pinned to a single
//! connection because every SQLite connection owns its own `:memory:` store.

use anyhow::{Context, Result};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Create a connection pool for the given database URL or file path.
pub async fn create_pool(url: &str) -> Result<SqlitePool> {
    let in_memory = url == ":memory:" || url.starts_with("sqlite::memory:");

    if !in_memory {
        let path = url.trim_start_matches("sqlite:");
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
            }
        }
    }

    let connection_url = if in_memory {
        "sqlite::memory:".to_string()
    } else if url.starts_with("sqlite:") {
        url.to_string()
    } else {
        format!("sqlite:{}?mode=rwc", url)
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 20 })
        .connect(&connection_url)
        .await
        .with_context(|| format!("Failed to connect to SQLite database: {}", url))?;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .context("Failed to enable foreign keys")?;

    Ok(pool)
}

/// In-memory pool for tests, with migrations already applied.
pub async fn create_test_pool() -> Result<SqlitePool> {
    let pool = create_pool(":memory:").await?;
    super::migrations::run_migrations(&pool).await?;
    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_pool_creation() {
        let pool = create_pool(":memory:").await.expect("Failed to create pool");
        sqlx::query("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("Ping should succeed");
    }

    #[tokio::test]
    async fn test_pool_has_schema() {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        sqlx::query("SELECT COUNT(*) FROM admins")
            .fetch_one(&pool)
            .await
            .expect("admins table should exist");
    }
}
