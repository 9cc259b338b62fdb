//! Admin model
//!
//! The only entity with security-relevant invariants: unique email, and a
//! `password` column holding ciphertext produced by the credential codec
//! (see `services::credential`) — never serialized out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A panel administrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: i64,
    /// Unique, matched exactly (case-sensitive) when resolving a principal.
    pub email: String,
    pub username: Option<String>,
    pub name: String,
    /// Ciphertext credential; the codec can reverse it, clients never see it.
    #[serde(skip_serializing)]
    pub password: String,
    pub img: Option<String>,
    pub phone: Option<String>,
    /// Stored but not enforced by any gate in this backend.
    pub is_central_admin: bool,
    pub two_factor: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an admin. `password` here is already ciphertext —
/// encryption happens in the service layer before this struct is built.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub username: Option<String>,
    pub name: String,
    pub password: String,
    pub img: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_never_serialized() {
        let admin = Admin {
            id: 1,
            email: "a@x.com".into(),
            username: Some("a".into()),
            name: "A".into(),
            password: "ciphertext-here".into(),
            img: None,
            phone: None,
            is_central_admin: false,
            two_factor: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&admin).unwrap();
        assert!(!json.contains("ciphertext-here"));
        assert!(!json.contains("password"));
    }
}
