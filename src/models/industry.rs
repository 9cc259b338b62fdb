//! Industry and industry category
//!
//! Industries are grouped by category and addressed publicly by slug
//! (`/api/industry/detail/{slug}`, `/api/industry/{category}`). Slugs are
//! unique per kind, enforced by the storage layer.

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Industry {
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Slug of the industry category this belongs to.
    pub category: String,
}

impl Resource for Industry {
    const KIND: &'static str = "industry";
    const LABEL: &'static str = "Industry";

    type Payload = Industry;

    fn validate(payload: &Self::Payload) -> Result<(), String> {
        if payload.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if payload.slug.trim().is_empty() {
            return Err("Slug is required".into());
        }
        if payload.description.trim().is_empty() {
            return Err("Description is required".into());
        }
        if payload.category.trim().is_empty() {
            return Err("Category is required".into());
        }
        Ok(())
    }

    fn slug(payload: &Self::Payload) -> Option<String> {
        Some(payload.slug.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryCategory {
    pub title: String,
    pub slug: String,
}

impl Resource for IndustryCategory {
    const KIND: &'static str = "industry_category";
    const LABEL: &'static str = "Industry category";

    type Payload = IndustryCategory;

    fn validate(payload: &Self::Payload) -> Result<(), String> {
        if payload.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if payload.slug.trim().is_empty() {
            return Err("Slug is required".into());
        }
        Ok(())
    }

    fn slug(payload: &Self::Payload) -> Option<String> {
        Some(payload.slug.clone())
    }
}
