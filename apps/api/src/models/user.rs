use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Hr,
    Candidate,
}

impl UserRole {
    pub fn label(self) -> &'static str {
        match self {
            UserRole::Hr => "HR",
            UserRole::Candidate => "CANDIDATE",
        }
    }
}

/// A portal account. Candidates additionally carry skills and resume text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_text: Option<String>,
}

impl User {
    /// Text sent to the resume scorer: the resume itself, or a skills line when
    /// the candidate never filled one in.
    pub fn scoring_text(&self) -> String {
        match self.resume_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!("Profile skills: {}", self.skills.join(", ")),
        }
    }
}
