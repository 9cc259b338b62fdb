//! Project / portfolio entry

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub slug: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

impl Resource for Project {
    const KIND: &'static str = "project";
    const LABEL: &'static str = "Project";

    type Payload = Project;

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
        Ok(())
    }

    fn slug(payload: &Self::Payload) -> Option<String> {
        Some(payload.slug.clone())
    }
}
