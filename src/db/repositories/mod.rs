//! Database repositories
//!
//! Repository pattern implementations for database access. All content
//! kinds share the generic `content` repository; admins and quote requests
//! get dedicated ones. Storage failures never escape as raw errors — every
//! method returns a typed `StoreError`.

pub mod admin;
pub mod content;
pub mod quote;

use thiserror::Error;

pub use admin::{AdminRepository, SqlxAdminRepository};
pub use content::{
    ContentRepository, DisplayOrderUpdate, KindSpec, NewContent, SqlxContentRepository,
    UpdateContent,
};
pub use quote::{QuoteRepository, SqlxQuoteRepository};

/// Failure taxonomy of the storage layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The targeted record does not exist. Retrying changes nothing.
    #[error("{0}")]
    NotFound(String),

    /// A uniqueness constraint (email, per-kind slug) was violated.
    #[error("{0}")]
    Duplicate(String),

    /// A structural rule was violated (e.g. second singleton record).
    #[error("{0}")]
    Conflict(String),

    /// Connectivity or unexpected engine failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Map a sqlx error, turning unique-index violations into `Duplicate`
    /// with the given message and everything else into `Other`.
    pub(crate) fn from_sqlx(err: sqlx::Error, duplicate_message: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StoreError::Duplicate(duplicate_message.to_string());
            }
        }
        StoreError::Other(err.into())
    }
}
