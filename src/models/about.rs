//! About page content
//!
//! Singleton: the site has at most one about document. Creating a second is
//! refused by the repository; updating before one exists points the caller
//! at create.

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct About {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub vision: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Resource for About {
    const KIND: &'static str = "about";
    const LABEL: &'static str = "About";
    const SINGLETON: bool = true;

    type Payload = About;

    fn validate(payload: &Self::Payload) -> Result<(), String> {
        if payload.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if payload.description.trim().is_empty() {
            return Err("Description is required".into());
        }
        Ok(())
    }
}
