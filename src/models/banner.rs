//! Homepage banner

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub image: String,
    #[serde(default)]
    pub link: Option<String>,
}

impl Resource for Banner {
    const KIND: &'static str = "banner";
    const LABEL: &'static str = "Banner";

    type Payload = Banner;

    fn validate(payload: &Self::Payload) -> Result<(), String> {
        if payload.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if payload.image.trim().is_empty() {
            return Err("Image is required".into());
        }
        Ok(())
    }
}
