//! Quote request repository
//!
//! Public submissions worked through by admins. `seen_at` is stamped by the
//! SQL itself on the first transition to `seen` and never afterwards, so
//! repeating the same status update is harmless.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;

use super::StoreError;
use crate::models::{NewQuote, QuoteRequest, QuoteStats, QuoteStatus};

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, quote: &NewQuote) -> Result<QuoteRequest, StoreError>;

    /// All quote requests, newest first.
    async fn list(&self) -> Result<Vec<QuoteRequest>, StoreError>;

    async fn get(&self, id: i64) -> Result<QuoteRequest, StoreError>;

    async fn update_status(&self, id: i64, status: QuoteStatus) -> Result<QuoteRequest, StoreError>;

    async fn delete(&self, id: i64) -> Result<(), StoreError>;

    async fn stats(&self) -> Result<QuoteStats, StoreError>;
}

pub struct SqlxQuoteRepository {
    pool: SqlitePool,
}

impl SqlxQuoteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn QuoteRepository> {
        Arc::new(Self::new(pool))
    }
}

const SELECT_BASE: &str = r#"
    SELECT id, name, email, phone, company, service, message,
           status, seen_at, created_at, updated_at
    FROM quote_requests
"#;

#[async_trait]
impl QuoteRepository for SqlxQuoteRepository {
    async fn create(&self, quote: &NewQuote) -> Result<QuoteRequest, StoreError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO quote_requests
                (name, email, phone, company, service, message, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, 'new', ?, ?)
            "#,
        )
        .bind(&quote.name)
        .bind(&quote.email)
        .bind(&quote.phone)
        .bind(&quote.company)
        .bind(&quote.service)
        .bind(&quote.message)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .context("Failed to create quote request")?;

        self.get(result.last_insert_rowid()).await
    }

    async fn list(&self) -> Result<Vec<QuoteRequest>, StoreError> {
        let rows = sqlx::query(&format!("{} ORDER BY created_at DESC, id DESC", SELECT_BASE))
            .fetch_all(&self.pool)
            .await
            .context("Failed to list quote requests")?;

        rows.iter().map(row_to_quote).collect()
    }

    async fn get(&self, id: i64) -> Result<QuoteRequest, StoreError> {
        let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_BASE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch quote request")?;

        match row {
            Some(row) => row_to_quote(&row),
            None => Err(StoreError::NotFound("Quote request not found".into())),
        }
    }

    async fn update_status(&self, id: i64, status: QuoteStatus) -> Result<QuoteRequest, StoreError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE quote_requests
            SET status = ?,
                seen_at = CASE WHEN ? = 'seen' AND seen_at IS NULL THEN ? ELSE seen_at END,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(status.to_string())
        .bind(status.to_string())
        .bind(now)
        .bind(now)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("Failed to update quote status")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Quote request not found".into()));
        }

        self.get(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM quote_requests WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete quote request")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound("Quote request not found".into()));
        }
        Ok(())
    }

    async fn stats(&self) -> Result<QuoteStats, StoreError> {
        let rows = sqlx::query("SELECT status, COUNT(*) AS n FROM quote_requests GROUP BY status")
            .fetch_all(&self.pool)
            .await
            .context("Failed to compute quote stats")?;

        let mut stats = QuoteStats::default();
        for row in rows {
            let count: i64 = row.get("n");
            let status: String = row.get("status");
            stats.total += count;
            match QuoteStatus::from_str(&status) {
                Ok(QuoteStatus::New) => stats.new = count,
                Ok(QuoteStatus::Seen) => stats.seen = count,
                Ok(QuoteStatus::Contacted) => stats.contacted = count,
                Ok(QuoteStatus::Closed) => stats.closed = count,
                Err(_) => tracing::warn!(status, "unknown quote status in storage"),
            }
        }
        Ok(stats)
    }
}

fn row_to_quote(row: &sqlx::sqlite::SqliteRow) -> Result<QuoteRequest, StoreError> {
    let status: String = row.try_get("status").context("quote status")?;
    let status = QuoteStatus::from_str(&status).context("Invalid stored quote status")?;

    Ok(QuoteRequest {
        id: row.try_get("id").context("quote id")?,
        name: row.try_get("name").context("quote name")?,
        email: row.try_get("email").context("quote email")?,
        phone: row.try_get("phone").context("quote phone")?,
        company: row.try_get("company").context("quote company")?,
        service: row.try_get("service").context("quote service")?,
        message: row.try_get("message").context("quote message")?,
        status,
        seen_at: row.try_get::<Option<DateTime<Utc>>, _>("seen_at").context("quote seen_at")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").context("quote created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").context("quote updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;

    fn quote() -> NewQuote {
        NewQuote {
            name: "Visitor".into(),
            email: "visitor@example.com".into(),
            phone: "+1 555 010 2030".into(),
            company: Some("Acme".into()),
            service: Some("Web development".into()),
            message: "We need a website".into(),
        }
    }

    #[tokio::test]
    async fn new_quotes_start_unseen() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqlxQuoteRepository::new(pool);

        let created = repo.create(&quote()).await.unwrap();
        assert_eq!(created.status, QuoteStatus::New);
        assert!(created.seen_at.is_none());
    }

    #[tokio::test]
    async fn seen_at_is_stamped_once() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqlxQuoteRepository::new(pool);
        let created = repo.create(&quote()).await.unwrap();

        let first = repo.update_status(created.id, QuoteStatus::Seen).await.unwrap();
        let stamped = first.seen_at.expect("seen_at set on first transition");

        let second = repo.update_status(created.id, QuoteStatus::Seen).await.unwrap();
        assert_eq!(second.seen_at, Some(stamped), "repeat update must not move seen_at");

        // Later transitions keep the original stamp too.
        let contacted = repo.update_status(created.id, QuoteStatus::Contacted).await.unwrap();
        assert_eq!(contacted.seen_at, Some(stamped));
        assert_eq!(contacted.status, QuoteStatus::Contacted);
    }

    #[tokio::test]
    async fn status_update_on_missing_id_is_not_found() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqlxQuoteRepository::new(pool);

        let err = repo.update_status(42, QuoteStatus::Seen).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn stats_count_by_status() {
        let pool = create_test_pool().await.unwrap();
        let repo = SqlxQuoteRepository::new(pool);

        let a = repo.create(&quote()).await.unwrap();
        let _b = repo.create(&quote()).await.unwrap();
        let c = repo.create(&quote()).await.unwrap();

        repo.update_status(a.id, QuoteStatus::Seen).await.unwrap();
        repo.update_status(c.id, QuoteStatus::Closed).await.unwrap();

        let stats = repo.stats().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.seen, 1);
        assert_eq!(stats.closed, 1);
        assert_eq!(stats.contacted, 0);
    }
}
