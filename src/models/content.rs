//! Generic content record
//!
//! Every managed content kind (banners, careers, team members, ...) is
//! stored as one `content_records` row: common columns here, the
//! kind-specific fields as a JSON payload in `data`. The `Resource` trait is
//! what a kind implements to plug into the generic repository and routes —
//! its payload type, validation, and the per-kind constraints (singleton,
//! unique slug, explicit ordering).

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Reference to the admin who created or last edited a record, resolved by
/// a join at read time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// One stored content record of any kind.
#[derive(Debug, Clone, Serialize)]
pub struct ContentRecord {
    pub id: i64,
    pub kind: String,
    pub slug: Option<String>,
    /// Kind-specific fields, opaque to the storage layer.
    pub data: serde_json::Value,
    pub active: bool,
    pub display_order: i64,
    pub author: Option<AuthorRef>,
    pub last_edited_by: Option<AuthorRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A managed content kind.
///
/// Implementations are zero-sized marker types; the payload struct carries
/// the fields. `validate` runs before anything touches storage and returns a
/// client-facing message on failure.
pub trait Resource: Send + Sync + 'static {
    /// Kind discriminator stored in the `kind` column.
    const KIND: &'static str;

    /// At most one record of this kind may exist.
    const SINGLETON: bool = false;

    /// Lists sort by `display_order` instead of recency.
    const ORDERED: bool = false;

    /// Human label used in client-facing messages ("Career", "Banner", ...).
    const LABEL: &'static str;

    type Payload: Serialize + DeserializeOwned + Send + Sync;

    fn validate(payload: &Self::Payload) -> Result<(), String>;

    /// Slug to enforce unique within the kind, where the kind has one.
    fn slug(_payload: &Self::Payload) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Career, Industry};

    #[test]
    fn slug_defaults_to_none() {
        let career = Career {
            title: "Backend Engineer".into(),
            description: "Build things".into(),
            location: "Remote".into(),
            job_type: "Full-time".into(),
            experience: None,
            skills: vec![],
        };
        assert_eq!(Career::slug(&career), None);
    }

    #[test]
    fn slugged_kinds_report_their_slug() {
        let industry = Industry {
            title: "Healthcare".into(),
            slug: "healthcare".into(),
            description: "Hospitals and clinics".into(),
            image: None,
            category: "services".into(),
        };
        assert_eq!(Industry::slug(&industry), Some("healthcare".to_string()));
    }
}
