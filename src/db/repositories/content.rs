//! Generic content repository
//!
//! One repository serves every managed content kind. A `KindSpec` (derived
//! from the kind's `Resource` impl) tells it which rows to touch and which
//! structural rules apply: singleton kinds refuse a second record, slugged
//! kinds enforce per-kind slug uniqueness, ordered kinds list by
//! `display_order` instead of recency.
//!
//! Authorship columns are stamped from ids the route layer resolved —
//! `author_id` on create only, `last_edited_by` on every write.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use super::StoreError;
use crate::models::content::{AuthorRef, ContentRecord, Resource};

/// Runtime description of a content kind, lifted off its `Resource` impl.
#[derive(Debug, Clone, Copy)]
pub struct KindSpec {
    pub kind: &'static str,
    pub label: &'static str,
    pub singleton: bool,
    pub ordered: bool,
}

impl KindSpec {
    pub fn of<R: Resource>() -> Self {
        Self {
            kind: R::KIND,
            label: R::LABEL,
            singleton: R::SINGLETON,
            ordered: R::ORDERED,
        }
    }
}

/// Write input for a new record.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub slug: Option<String>,
    pub data: serde_json::Value,
    pub active: bool,
    pub display_order: i64,
    pub author_id: i64,
}

/// Write input for updating a record. `data` replaces the stored payload
/// wholly; `active`/`display_order` change only when given.
#[derive(Debug, Clone)]
pub struct UpdateContent {
    pub slug: Option<String>,
    pub data: serde_json::Value,
    pub active: Option<bool>,
    pub display_order: Option<i64>,
    pub editor_id: i64,
}

/// One entry of a display-order rewrite.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayOrderUpdate {
    pub id: i64,
    pub display_order: i64,
}

#[async_trait]
pub trait ContentRepository: Send + Sync {
    async fn list(&self, spec: &KindSpec, active_only: bool) -> Result<Vec<ContentRecord>, StoreError>;

    async fn get(&self, spec: &KindSpec, id: i64) -> Result<ContentRecord, StoreError>;

    async fn get_by_slug(&self, spec: &KindSpec, slug: &str) -> Result<ContentRecord, StoreError>;

    /// Records whose payload field equals the given value
    /// (e.g. industries of one category).
    async fn list_by_field(
        &self,
        spec: &KindSpec,
        field: &str,
        value: &str,
        active_only: bool,
    ) -> Result<Vec<ContentRecord>, StoreError>;

    async fn create(&self, spec: &KindSpec, new: NewContent) -> Result<ContentRecord, StoreError>;

    async fn update(
        &self,
        spec: &KindSpec,
        id: i64,
        update: UpdateContent,
    ) -> Result<ContentRecord, StoreError>;

    /// Update the sole record of a singleton kind.
    async fn update_singleton(
        &self,
        spec: &KindSpec,
        update: UpdateContent,
    ) -> Result<ContentRecord, StoreError>;

    async fn delete(&self, spec: &KindSpec, id: i64) -> Result<(), StoreError>;

    /// Rewrite display orders for a set of records in one transaction.
    async fn set_display_order(
        &self,
        spec: &KindSpec,
        orders: &[DisplayOrderUpdate],
    ) -> Result<(), StoreError>;
}

pub struct SqlxContentRepository {
    pool: SqlitePool,
}

impl SqlxContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn ContentRepository> {
        Arc::new(Self::new(pool))
    }

    async fn fetch(&self, spec: &KindSpec, id: i64) -> Result<Option<ContentRecord>, StoreError> {
        let row = sqlx::query(&format!("{} WHERE c.kind = ? AND c.id = ?", SELECT_BASE))
            .bind(spec.kind)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch content record")?;

        row.as_ref().map(row_to_record).transpose()
    }

    /// Slug-uniqueness probe. The unique index is the backstop; probing
    /// first yields the client-facing message.
    async fn slug_taken(
        &self,
        spec: &KindSpec,
        slug: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query(
            "SELECT COUNT(*) AS n FROM content_records WHERE kind = ? AND slug = ? AND id != ?",
        )
        .bind(spec.kind)
        .bind(slug)
        .bind(exclude_id.unwrap_or(-1))
        .fetch_one(&self.pool)
        .await
        .context("Failed to check slug uniqueness")?
        .get("n");
        Ok(count > 0)
    }
}

// Author references are resolved at read time by joining admins twice.
const SELECT_BASE: &str = r#"
    SELECT c.id, c.kind, c.slug, c.data, c.active, c.display_order,
           c.author_id, c.last_edited_by, c.created_at, c.updated_at,
           a.name AS author_name, a.email AS author_email,
           e.name AS editor_name, e.email AS editor_email
    FROM content_records c
    LEFT JOIN admins a ON a.id = c.author_id
    LEFT JOIN admins e ON e.id = c.last_edited_by
"#;

#[async_trait]
impl ContentRepository for SqlxContentRepository {
    async fn list(&self, spec: &KindSpec, active_only: bool) -> Result<Vec<ContentRecord>, StoreError> {
        let order_clause = if spec.ordered {
            "ORDER BY c.display_order ASC, c.id ASC"
        } else {
            "ORDER BY c.created_at DESC, c.id DESC"
        };
        let active_clause = if active_only { "AND c.active = 1" } else { "" };

        let rows = sqlx::query(&format!(
            "{} WHERE c.kind = ? {} {}",
            SELECT_BASE, active_clause, order_clause
        ))
        .bind(spec.kind)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list content records")?;

        rows.iter().map(row_to_record).collect()
    }

    async fn get(&self, spec: &KindSpec, id: i64) -> Result<ContentRecord, StoreError> {
        self.fetch(spec, id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{} not found", spec.label)))
    }

    async fn get_by_slug(&self, spec: &KindSpec, slug: &str) -> Result<ContentRecord, StoreError> {
        let row = sqlx::query(&format!("{} WHERE c.kind = ? AND c.slug = ?", SELECT_BASE))
            .bind(spec.kind)
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to fetch content record by slug")?;

        match row {
            Some(row) => row_to_record(&row),
            None => Err(StoreError::NotFound(format!("{} not found", spec.label))),
        }
    }

    async fn list_by_field(
        &self,
        spec: &KindSpec,
        field: &str,
        value: &str,
        active_only: bool,
    ) -> Result<Vec<ContentRecord>, StoreError> {
        let active_clause = if active_only { "AND c.active = 1" } else { "" };

        let rows = sqlx::query(&format!(
            "{} WHERE c.kind = ? AND json_extract(c.data, ?) = ? {} ORDER BY c.created_at DESC, c.id DESC",
            SELECT_BASE, active_clause
        ))
        .bind(spec.kind)
        .bind(format!("$.{}", field))
        .bind(value)
        .fetch_all(&self.pool)
        .await
        .context("Failed to list content records by field")?;

        rows.iter().map(row_to_record).collect()
    }

    async fn create(&self, spec: &KindSpec, new: NewContent) -> Result<ContentRecord, StoreError> {
        if spec.singleton {
            let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM content_records WHERE kind = ?")
                .bind(spec.kind)
                .fetch_one(&self.pool)
                .await
                .context("Failed to count singleton records")?
                .get("n");
            if count > 0 {
                return Err(StoreError::Conflict(format!(
                    "{} content already exists, use update instead",
                    spec.label
                )));
            }
        }

        if let Some(slug) = &new.slug {
            if self.slug_taken(spec, slug, None).await? {
                return Err(StoreError::Duplicate(format!(
                    "{} with this slug already exists",
                    spec.label
                )));
            }
        }

        let now = Utc::now();
        let data =
            serde_json::to_string(&new.data).context("Failed to serialize content payload")?;

        let result = sqlx::query(
            r#"
            INSERT INTO content_records
                (kind, slug, data, active, display_order, author_id, last_edited_by, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(spec.kind)
        .bind(&new.slug)
        .bind(data)
        .bind(new.active)
        .bind(new.display_order)
        .bind(new.author_id)
        .bind(new.author_id)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            StoreError::from_sqlx(e, &format!("{} with this slug already exists", spec.label))
        })?;

        self.get(spec, result.last_insert_rowid()).await
    }

    async fn update(
        &self,
        spec: &KindSpec,
        id: i64,
        update: UpdateContent,
    ) -> Result<ContentRecord, StoreError> {
        let existing = self
            .fetch(spec, id)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("{} not found", spec.label)))?;

        if let Some(slug) = &update.slug {
            if self.slug_taken(spec, slug, Some(id)).await? {
                return Err(StoreError::Duplicate(format!(
                    "{} with this slug already exists",
                    spec.label
                )));
            }
        }

        let now = Utc::now();
        let data =
            serde_json::to_string(&update.data).context("Failed to serialize content payload")?;

        sqlx::query(
            r#"
            UPDATE content_records
            SET slug = ?, data = ?, active = ?, display_order = ?, last_edited_by = ?, updated_at = ?
            WHERE kind = ? AND id = ?
            "#,
        )
        .bind(&update.slug)
        .bind(data)
        .bind(update.active.unwrap_or(existing.active))
        .bind(update.display_order.unwrap_or(existing.display_order))
        .bind(update.editor_id)
        .bind(now)
        .bind(spec.kind)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            StoreError::from_sqlx(e, &format!("{} with this slug already exists", spec.label))
        })?;

        self.get(spec, id).await
    }

    async fn update_singleton(
        &self,
        spec: &KindSpec,
        update: UpdateContent,
    ) -> Result<ContentRecord, StoreError> {
        let row = sqlx::query("SELECT id FROM content_records WHERE kind = ? LIMIT 1")
            .bind(spec.kind)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to locate singleton record")?;

        let id: i64 = match row {
            Some(row) => row.get("id"),
            None => {
                return Err(StoreError::NotFound(format!(
                    "{} content does not exist yet, create it first",
                    spec.label
                )))
            }
        };

        self.update(spec, id, update).await
    }

    async fn delete(&self, spec: &KindSpec, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM content_records WHERE kind = ? AND id = ?")
            .bind(spec.kind)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete content record")?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("{} not found", spec.label)));
        }
        Ok(())
    }

    async fn set_display_order(
        &self,
        spec: &KindSpec,
        orders: &[DisplayOrderUpdate],
    ) -> Result<(), StoreError> {
        // All rows move together or not at all.
        let mut tx = self.pool.begin().await.context("Failed to begin transaction")?;
        let now = Utc::now();

        for entry in orders {
            let result = sqlx::query(
                "UPDATE content_records SET display_order = ?, updated_at = ? WHERE kind = ? AND id = ?",
            )
            .bind(entry.display_order)
            .bind(now)
            .bind(spec.kind)
            .bind(entry.id)
            .execute(&mut *tx)
            .await
            .context("Failed to update display order")?;

            if result.rows_affected() == 0 {
                return Err(StoreError::NotFound(format!("{} not found", spec.label)));
            }
        }

        tx.commit().await.context("Failed to commit display order update")?;
        Ok(())
    }
}

fn row_to_record(row: &sqlx::sqlite::SqliteRow) -> Result<ContentRecord, StoreError> {
    let data: String = row.try_get("data").context("content data")?;
    let data = serde_json::from_str(&data).context("Failed to parse content payload")?;

    let author = match row.try_get::<Option<String>, _>("author_name").context("author name")? {
        Some(name) => Some(AuthorRef {
            id: row.try_get("author_id").context("author id")?,
            name,
            email: row.try_get("author_email").context("author email")?,
        }),
        None => None,
    };
    let last_edited_by = match row.try_get::<Option<String>, _>("editor_name").context("editor name")? {
        Some(name) => Some(AuthorRef {
            id: row.try_get("last_edited_by").context("editor id")?,
            name,
            email: row.try_get("editor_email").context("editor email")?,
        }),
        None => None,
    };

    Ok(ContentRecord {
        id: row.try_get("id").context("content id")?,
        kind: row.try_get("kind").context("content kind")?,
        slug: row.try_get("slug").context("content slug")?,
        data,
        active: row.try_get("active").context("content active")?,
        display_order: row.try_get("display_order").context("content display_order")?,
        author,
        last_edited_by,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").context("content created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").context("content updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_test_pool;
    use crate::db::repositories::{AdminRepository, SqlxAdminRepository};
    use crate::models::{About, Address, Career, Industry, NewAdmin};
    use serde_json::json;

    async fn setup() -> (SqlitePool, SqlxContentRepository, i64, i64) {
        let pool = create_test_pool().await.unwrap();
        let admins = SqlxAdminRepository::new(pool.clone());
        let p = admins
            .create(&NewAdmin {
                email: "p@x.com".into(),
                username: None,
                name: "P".into(),
                password: "ct".into(),
                img: None,
                phone: None,
            })
            .await
            .unwrap();
        let q = admins
            .create(&NewAdmin {
                email: "q@x.com".into(),
                username: None,
                name: "Q".into(),
                password: "ct".into(),
                img: None,
                phone: None,
            })
            .await
            .unwrap();
        let repo = SqlxContentRepository::new(pool.clone());
        (pool, repo, p.id, q.id)
    }

    fn career_payload(title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "description": "Build things",
            "location": "Remote",
            "job_type": "Full-time",
            "experience": null,
            "skills": ["rust"],
        })
    }

    fn new_content(data: serde_json::Value, author_id: i64) -> NewContent {
        NewContent {
            slug: None,
            data,
            active: true,
            display_order: 0,
            author_id,
        }
    }

    #[tokio::test]
    async fn create_stamps_author_and_editor() {
        let (_pool, repo, p, _q) = setup().await;
        let spec = KindSpec::of::<Career>();

        let record = repo
            .create(&spec, new_content(career_payload("Backend Engineer"), p))
            .await
            .unwrap();

        assert_eq!(record.author.as_ref().unwrap().id, p);
        assert_eq!(record.last_edited_by.as_ref().unwrap().id, p);
        assert_eq!(record.data["title"], "Backend Engineer");
    }

    #[tokio::test]
    async fn update_preserves_author_and_stamps_editor() {
        let (_pool, repo, p, q) = setup().await;
        let spec = KindSpec::of::<Career>();

        let record = repo
            .create(&spec, new_content(career_payload("Backend Engineer"), p))
            .await
            .unwrap();

        let updated = repo
            .update(
                &spec,
                record.id,
                UpdateContent {
                    slug: None,
                    data: career_payload("Senior Backend Engineer"),
                    active: None,
                    display_order: None,
                    editor_id: q,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.author.as_ref().unwrap().id, p, "author never changes");
        assert_eq!(updated.last_edited_by.as_ref().unwrap().id, q);
        assert_eq!(updated.data["title"], "Senior Backend Engineer");
    }

    #[tokio::test]
    async fn update_and_delete_missing_id_fail_without_writes() {
        let (_pool, repo, p, _q) = setup().await;
        let spec = KindSpec::of::<Career>();

        for _ in 0..2 {
            let err = repo
                .update(
                    &spec,
                    9999,
                    UpdateContent {
                        slug: None,
                        data: career_payload("Ghost"),
                        active: None,
                        display_order: None,
                        editor_id: p,
                    },
                )
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::NotFound(_)));

            let err = repo.delete(&spec, 9999).await.unwrap_err();
            assert!(matches!(err, StoreError::NotFound(_)));
        }

        assert!(repo.list(&spec, false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn singleton_create_refuses_second_record() {
        let (pool, repo, p, _q) = setup().await;
        let spec = KindSpec::of::<About>();
        let payload = json!({
            "title": "About us",
            "description": "We build software",
            "mission": null,
            "vision": null,
            "image": null,
        });

        repo.create(&spec, new_content(payload.clone(), p)).await.unwrap();
        let err = repo.create(&spec, new_content(payload, p)).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM content_records WHERE kind = 'about'")
            .fetch_one(&pool)
            .await
            .unwrap()
            .get("n");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn singleton_update_requires_existing_record() {
        let (_pool, repo, p, _q) = setup().await;
        let spec = KindSpec::of::<About>();

        let err = repo
            .update_singleton(
                &spec,
                UpdateContent {
                    slug: None,
                    data: json!({"title": "t", "description": "d"}),
                    active: None,
                    display_order: None,
                    editor_id: p,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn duplicate_slug_within_kind_is_rejected() {
        let (_pool, repo, p, _q) = setup().await;
        let spec = KindSpec::of::<Industry>();
        let payload = json!({
            "title": "Healthcare",
            "slug": "healthcare",
            "description": "Hospitals",
            "image": null,
            "category": "services",
        });

        let mut new = new_content(payload.clone(), p);
        new.slug = Some("healthcare".into());
        repo.create(&spec, new.clone()).await.unwrap();

        let err = repo.create(&spec, new).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
    }

    #[tokio::test]
    async fn list_by_field_filters_on_payload() {
        let (_pool, repo, p, _q) = setup().await;
        let spec = KindSpec::of::<Industry>();

        for (slug, category) in [("healthcare", "services"), ("fintech", "technology")] {
            let mut new = new_content(
                json!({
                    "title": slug,
                    "slug": slug,
                    "description": "d",
                    "image": null,
                    "category": category,
                }),
                p,
            );
            new.slug = Some(slug.into());
            repo.create(&spec, new).await.unwrap();
        }

        let services = repo
            .list_by_field(&spec, "category", "services", false)
            .await
            .unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].data["slug"], "healthcare");
    }

    #[tokio::test]
    async fn ordered_kind_lists_by_display_order() {
        let (_pool, repo, p, _q) = setup().await;
        let spec = KindSpec::of::<Address>();

        for (label, order) in [("Second", 2), ("First", 1), ("Third", 3)] {
            let mut new = new_content(
                json!({
                    "label": label,
                    "street": "1 Main St",
                    "city": "Springfield",
                    "country": "USA",
                    "phone": null,
                    "email": null,
                }),
                p,
            );
            new.display_order = order;
            repo.create(&spec, new).await.unwrap();
        }

        let listed = repo.list(&spec, false).await.unwrap();
        let labels: Vec<_> = listed.iter().map(|r| r.data["label"].clone()).collect();
        assert_eq!(labels, vec![json!("First"), json!("Second"), json!("Third")]);
    }

    #[tokio::test]
    async fn display_order_rewrite_is_atomic() {
        let (_pool, repo, p, _q) = setup().await;
        let spec = KindSpec::of::<Address>();

        let mut ids = Vec::new();
        for label in ["A", "B"] {
            let new = new_content(
                json!({
                    "label": label,
                    "street": "1 Main St",
                    "city": "Springfield",
                    "country": "USA",
                    "phone": null,
                    "email": null,
                }),
                p,
            );
            ids.push(repo.create(&spec, new).await.unwrap().id);
        }

        // One bad id rolls back the whole batch.
        let err = repo
            .set_display_order(
                &spec,
                &[
                    DisplayOrderUpdate { id: ids[0], display_order: 9 },
                    DisplayOrderUpdate { id: 9999, display_order: 1 },
                ],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let unchanged = repo.get(&spec, ids[0]).await.unwrap();
        assert_eq!(unchanged.display_order, 0);

        repo.set_display_order(
            &spec,
            &[
                DisplayOrderUpdate { id: ids[0], display_order: 2 },
                DisplayOrderUpdate { id: ids[1], display_order: 1 },
            ],
        )
        .await
        .unwrap();

        let listed = repo.list(&spec, false).await.unwrap();
        assert_eq!(listed[0].id, ids[1]);
        assert_eq!(listed[1].id, ids[0]);
    }

    #[tokio::test]
    async fn inactive_records_are_filtered_on_request() {
        let (_pool, repo, p, _q) = setup().await;
        let spec = KindSpec::of::<Career>();

        repo.create(&spec, new_content(career_payload("Visible"), p)).await.unwrap();
        let mut hidden = new_content(career_payload("Hidden"), p);
        hidden.active = false;
        repo.create(&spec, hidden).await.unwrap();

        assert_eq!(repo.list(&spec, false).await.unwrap().len(), 2);
        let active = repo.list(&spec, true).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].data["title"], "Visible");
    }
}
