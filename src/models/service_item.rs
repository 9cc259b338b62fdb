//! Service offering

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Resource for ServiceItem {
    const KIND: &'static str = "service";
    const LABEL: &'static str = "Service";

    type Payload = ServiceItem;

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
