//! Free-form page copy block, addressed by page + section.

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Page the block belongs to ("home", "services", ...).
    pub page: String,
    pub section: String,
    pub body: String,
}

impl Resource for ContentBlock {
    const KIND: &'static str = "content";
    const LABEL: &'static str = "Content";

    type Payload = ContentBlock;

    fn validate(payload: &Self::Payload) -> Result<(), String> {
        if payload.page.trim().is_empty() {
            return Err("Page is required".into());
        }
        if payload.section.trim().is_empty() {
            return Err("Section is required".into());
        }
        if payload.body.trim().is_empty() {
            return Err("Body is required".into());
        }
        Ok(())
    }
}
