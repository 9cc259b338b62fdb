//! Gallery item

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryItem {
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub category: Option<String>,
}

impl Resource for GalleryItem {
    const KIND: &'static str = "gallery";
    const LABEL: &'static str = "Gallery item";

    type Payload = GalleryItem;

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
