//! Homepage slider slide

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slider {
    pub title: String,
    pub image: String,
    #[serde(default)]
    pub caption: Option<String>,
}

impl Resource for Slider {
    const KIND: &'static str = "slider";
    const LABEL: &'static str = "Slider";

    type Payload = Slider;

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
