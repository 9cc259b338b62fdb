//! Admin repository
//!
//! Lookups are by exact email match — the principal resolver depends on
//! that, and "no such admin" is reported as `Ok(None)`, not an error, so
//! callers can distinguish a missing principal from a storage failure.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use super::StoreError;
use crate::models::{Admin, NewAdmin};

#[async_trait]
pub trait AdminRepository: Send + Sync {
    /// Insert a new admin. The email must be unique.
    async fn create(&self, admin: &NewAdmin) -> Result<Admin, StoreError>;

    /// Exact-match lookup by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// All admins, newest first.
    async fn list(&self) -> Result<Vec<Admin>, StoreError>;
}

pub struct SqlxAdminRepository {
    pool: SqlitePool,
}

impl SqlxAdminRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: SqlitePool) -> Arc<dyn AdminRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl AdminRepository for SqlxAdminRepository {
    async fn create(&self, admin: &NewAdmin) -> Result<Admin, StoreError> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO admins (email, username, name, password, img, phone, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&admin.email)
        .bind(&admin.username)
        .bind(&admin.name)
        .bind(&admin.password)
        .bind(&admin.img)
        .bind(&admin.phone)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::from_sqlx(e, "Admin already exists"))?;

        let id = result.last_insert_rowid();

        Ok(Admin {
            id,
            email: admin.email.clone(),
            username: admin.username.clone(),
            name: admin.name.clone(),
            password: admin.password.clone(),
            img: admin.img.clone(),
            phone: admin.phone.clone(),
            is_central_admin: false,
            two_factor: false,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, username, name, password, img, phone,
                   is_central_admin, two_factor, created_at, updated_at
            FROM admins
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch admin by email")?;

        match row {
            Some(row) => Ok(Some(row_to_admin(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM admins WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check admin existence")?
            .get("n");
        Ok(count > 0)
    }

    async fn list(&self) -> Result<Vec<Admin>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, username, name, password, img, phone,
                   is_central_admin, two_factor, created_at, updated_at
            FROM admins
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list admins")?;

        rows.iter().map(row_to_admin).collect()
    }
}

fn row_to_admin(row: &sqlx::sqlite::SqliteRow) -> Result<Admin, StoreError> {
    Ok(Admin {
        id: row.try_get("id").context("admin id")?,
        email: row.try_get("email").context("admin email")?,
        username: row.try_get("username").context("admin username")?,
        name: row.try_get("name").context("admin name")?,
        password: row.try_get("password").context("admin password")?,
        img: row.try_get("img").context("admin img")?,
        phone: row.try_get("phone").context("admin phone")?,
        is_central_admin: row.try_get("is_central_admin").context("admin flag")?,
        two_factor: row.try_get("two_factor").context("admin flag")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at").context("admin created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at").context("admin updated_at")?,
    })
}
