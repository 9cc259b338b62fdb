//! Quote request (get-a-quote form)
//!
//! Submitted publicly, worked through by admins via a small status
//! lifecycle. `seen_at` records when an admin first saw the request and is
//! stamped exactly once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize)]
pub struct QuoteRequest {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    /// Service the visitor is asking about, free text.
    pub service: Option<String>,
    pub message: String,
    pub status: QuoteStatus,
    pub seen_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input from the public form, validated at the route layer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewQuote {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    pub message: String,
}

/// Lifecycle of a quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStatus {
    New,
    Seen,
    Contacted,
    Closed,
}

impl Default for QuoteStatus {
    fn default() -> Self {
        Self::New
    }
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStatus::New => write!(f, "new"),
            QuoteStatus::Seen => write!(f, "seen"),
            QuoteStatus::Contacted => write!(f, "contacted"),
            QuoteStatus::Closed => write!(f, "closed"),
        }
    }
}

impl FromStr for QuoteStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(QuoteStatus::New),
            "seen" => Ok(QuoteStatus::Seen),
            "contacted" => Ok(QuoteStatus::Contacted),
            "closed" => Ok(QuoteStatus::Closed),
            _ => Err(anyhow::anyhow!("Invalid quote status: {}", s)),
        }
    }
}

/// Per-status counts for the admin dashboard (`GET /api/gaq?stats=true`).
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuoteStats {
    pub total: i64,
    pub new: i64,
    pub seen: i64,
    pub contacted: i64,
    pub closed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            QuoteStatus::New,
            QuoteStatus::Seen,
            QuoteStatus::Contacted,
            QuoteStatus::Closed,
        ] {
            assert_eq!(QuoteStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(QuoteStatus::from_str("archived").is_err());
    }
}
