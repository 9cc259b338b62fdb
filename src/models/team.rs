//! Team member

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl Resource for TeamMember {
    const KIND: &'static str = "team";
    const LABEL: &'static str = "Team member";

    type Payload = TeamMember;

    fn validate(payload: &Self::Payload) -> Result<(), String> {
        if payload.name.trim().is_empty() {
            return Err("Name is required".into());
        }
        if payload.role.trim().is_empty() {
            return Err("Role is required".into());
        }
        Ok(())
    }
}
