//! Database migrations
//!
//! Code-based migrations embedded in the binary for single-binary
//! deployment. Each migration has a unique sequential version; applied
//! versions are tracked in `schema_migrations` and never re-run.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

/// A single schema migration.
#[derive(Debug, Clone)]
pub struct Migration {
    /// Migration version number (unique and sequential).
    pub version: i32,
    /// Human-readable migration name.
    pub name: &'static str,
    /// SQL statements to apply.
    pub up: &'static str,
}

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_admins",
        up: r#"
            CREATE TABLE IF NOT EXISTS admins (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email VARCHAR(255) NOT NULL UNIQUE,
                username VARCHAR(50),
                name VARCHAR(100) NOT NULL,
                password VARCHAR(512) NOT NULL,
                img TEXT,
                phone VARCHAR(32),
                is_central_admin BOOLEAN NOT NULL DEFAULT 0,
                two_factor BOOLEAN NOT NULL DEFAULT 0,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_admins_email ON admins(email);
        "#,
    },
    Migration {
        version: 2,
        name: "create_content_records",
        up: r#"
            CREATE TABLE IF NOT EXISTS content_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                kind VARCHAR(40) NOT NULL,
                slug VARCHAR(160),
                data TEXT NOT NULL,
                active BOOLEAN NOT NULL DEFAULT 1,
                display_order INTEGER NOT NULL DEFAULT 0,
                author_id INTEGER NOT NULL REFERENCES admins(id),
                last_edited_by INTEGER NOT NULL REFERENCES admins(id),
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_content_kind ON content_records(kind);
            CREATE UNIQUE INDEX IF NOT EXISTS idx_content_kind_slug
                ON content_records(kind, slug) WHERE slug IS NOT NULL;
        "#,
    },
    Migration {
        version: 3,
        name: "create_quote_requests",
        up: r#"
            CREATE TABLE IF NOT EXISTS quote_requests (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name VARCHAR(100) NOT NULL,
                email VARCHAR(255) NOT NULL,
                phone VARCHAR(32) NOT NULL,
                company VARCHAR(160),
                service VARCHAR(160),
                message TEXT NOT NULL,
                status VARCHAR(20) NOT NULL DEFAULT 'new',
                seen_at TIMESTAMP,
                created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
            );
            CREATE INDEX IF NOT EXISTS idx_quotes_status ON quote_requests(status);
        "#,
    },
];

/// Apply all pending migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            applied_at TIMESTAMP NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create schema_migrations table")?;

    let applied: Vec<i64> = sqlx::query("SELECT version FROM schema_migrations")
        .fetch_all(pool)
        .await
        .context("Failed to read applied migrations")?
        .iter()
        .map(|row| row.get::<i64, _>("version"))
        .collect();

    for migration in MIGRATIONS {
        if applied.contains(&(migration.version as i64)) {
            continue;
        }

        tracing::info!(version = migration.version, name = migration.name, "applying migration");

        // SQLite executes one statement per call, so split on ';'
        for statement in migration.up.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement)
                .execute(pool)
                .await
                .with_context(|| format!("Migration {} failed", migration.name))?;
        }

        sqlx::query("INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)")
            .bind(migration.version)
            .bind(migration.name)
            .bind(Utc::now())
            .execute(pool)
            .await
            .with_context(|| format!("Failed to record migration {}", migration.name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_pool;

    #[tokio::test]
    async fn migrations_apply_cleanly() {
        let pool = create_pool(":memory:").await.unwrap();
        run_migrations(&pool).await.expect("migrations should apply");

        for table in ["admins", "content_records", "quote_requests"] {
            sqlx::query(&format!("SELECT COUNT(*) FROM {}", table))
                .fetch_one(&pool)
                .await
                .unwrap_or_else(|_| panic!("{} table should exist", table));
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = create_pool(":memory:").await.unwrap();
        run_migrations(&pool).await.expect("first run");
        run_migrations(&pool).await.expect("second run");

        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM schema_migrations")
            .fetch_one(&pool)
            .await
            .map(|row| row.get("n"))
            .unwrap();
        assert_eq!(count, MIGRATIONS.len() as i64);
    }

    #[tokio::test]
    async fn versions_are_unique_and_ordered() {
        let mut last = 0;
        for migration in MIGRATIONS {
            assert!(migration.version > last, "versions must be strictly increasing");
            last = migration.version;
        }
    }
}
