use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::EmailKind;
use crate::models::{Company, NewJob};

/// Company every portal-created posting is published under.
const POSTING_COMPANY: &str = "NexusAI Global";
const POSTING_LOGO: &str = "🔷";
const POSTING_INDUSTRY: &str = "AI";
const DEFAULT_REQUIRED_SKILLS: &str = "Role Specific Skills";
const DEFAULT_JOINING_DETAILS: &str = "Negotiable";

/// The HR "new posting" form. Fields the form does not ask for get defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct JobForm {
    pub title: String,
    pub domain: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub salary_range: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub total_vacancies: Option<u32>,
}

impl JobForm {
    pub fn into_new_job(self) -> NewJob {
        NewJob {
            title: self.title,
            domain: self.domain,
            description: self.description,
            company: Company {
                name: POSTING_COMPANY.to_string(),
                logo: POSTING_LOGO.to_string(),
                industry: POSTING_INDUSTRY.to_string(),
                location: self.location,
            },
            required_skills: vec![DEFAULT_REQUIRED_SKILLS.to_string()],
            experience: self.experience,
            salary_range: self.salary_range,
            total_vacancies: self.total_vacancies.unwrap_or(1).max(1),
            joining_details: DEFAULT_JOINING_DETAILS.to_string(),
        }
    }
}

/// Most recent AI-assist result shown to the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssistantOutput {
    ProfileTips {
        text: String,
    },
    Reply {
        text: String,
    },
    Email {
        application_id: Uuid,
        email_kind: EmailKind,
        text: String,
    },
    OfficeLink {
        job_id: Uuid,
        url: String,
    },
}

#[cfg(test)]
impl AssistantOutput {
    pub fn text(&self) -> &str {
        match self {
            AssistantOutput::ProfileTips { text }
            | AssistantOutput::Reply { text }
            | AssistantOutput::Email { text, .. } => text,
            AssistantOutput::OfficeLink { url, .. } => url,
        }
    }
}
