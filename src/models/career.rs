//! Career posting

use serde::{Deserialize, Serialize};

use super::content::Resource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Career {
    pub title: String,
    pub description: String,
    pub location: String,
    /// "Full-time", "Contract", ...
    pub job_type: String,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Resource for Career {
    const KIND: &'static str = "career";
    const LABEL: &'static str = "Career";

    type Payload = Career;

    fn validate(payload: &Self::Payload) -> Result<(), String> {
        if payload.title.trim().is_empty() {
            return Err("Title is required".into());
        }
        if payload.description.trim().is_empty() {
            return Err("Description is required".into());
        }
        if payload.location.trim().is_empty() {
            return Err("Location is required".into());
        }
        if payload.job_type.trim().is_empty() {
            return Err("Job type is required".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_field_fails() {
        let career = Career {
            title: "Backend Engineer".into(),
            description: String::new(),
            location: "Remote".into(),
            job_type: "Full-time".into(),
            experience: None,
            skills: vec!["rust".into()],
        };
        assert_eq!(
            Career::validate(&career),
            Err("Description is required".to_string())
        );
    }
}
