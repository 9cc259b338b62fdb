//! Shared API response types
//!
//! Every endpoint answers with the same envelope shape
//! `{success, message, data?}`; `ContentView` is the client-facing
//! rendering of a content record with the payload fields inlined at the top
//! level, the way the admin panel and site consume them.

use serde::Serialize;

use crate::models::{AuthorRef, ContentRecord};

/// The uniform response envelope.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

impl Envelope<()> {
    /// Success with a message only, no data.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Client-facing view of a content record. The kind-specific payload is
/// flattened so resource fields sit beside the record metadata.
#[derive(Debug, Serialize)]
pub struct ContentView {
    pub id: i64,
    #[serde(flatten)]
    pub data: serde_json::Value,
    pub active: bool,
    pub display_order: i64,
    pub author: Option<AuthorRef>,
    pub last_edited_by: Option<AuthorRef>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ContentRecord> for ContentView {
    fn from(record: ContentRecord) -> Self {
        Self {
            id: record.id,
            data: record.data,
            active: record.active,
            display_order: record.display_order,
            author: record.author,
            last_edited_by: record.last_edited_by,
            created_at: record.created_at.to_rfc3339(),
            updated_at: record.updated_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_omits_absent_data() {
        let body = serde_json::to_value(Envelope::<()>::fail("nope")).unwrap();
        assert_eq!(body, json!({"success": false, "message": "nope"}));
    }

    #[test]
    fn content_view_inlines_payload_fields() {
        let record = ContentRecord {
            id: 3,
            kind: "banner".into(),
            slug: None,
            data: json!({"title": "Hello", "image": "x.png"}),
            active: true,
            display_order: 0,
            author: None,
            last_edited_by: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };

        let body = serde_json::to_value(ContentView::from(record)).unwrap();
        assert_eq!(body["id"], 3);
        assert_eq!(body["title"], "Hello");
        assert_eq!(body["image"], "x.png");
    }
}
