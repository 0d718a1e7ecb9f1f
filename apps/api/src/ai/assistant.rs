//! Fallback layer in front of an `AiProvider`.
//!
//! Every method is infallible: a provider error or timeout is logged and the
//! operation's fixed fallback is returned instead, so no user flow ever fails
//! because the model endpoint did.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tracing::{info, warn};

use crate::models::User;

use super::{AiProvider, EmailKind, ProviderError, ResumeAnalysis};

pub const FALLBACK_ATS_SCORE: u8 = 65;
pub const FALLBACK_FEEDBACK: &str =
    "Unable to fully parse. Basic match detected based on role keywords.";
pub const FALLBACK_MISSING_SKILLS: [&str; 2] = ["Specific framework experience", "System Design"];
pub const FALLBACK_PROFILE_TIPS: &str = "Add quantifiable achievements, update your profile \
    headline, and list your top 3 core technical certifications.";
pub const FALLBACK_REPLY: &str = "Thank you for reaching out! I am very interested in this role \
    and would love to discuss further. When would be a good time for a call?";

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

#[derive(Clone)]
pub struct Assistant {
    provider: Arc<dyn AiProvider>,
    timeout: Duration,
}

impl Assistant {
    pub fn new(provider: Arc<dyn AiProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub async fn score_resume(
        &self,
        resume_text: &str,
        job_title: &str,
        job_description: &str,
    ) -> ResumeAnalysis {
        let result = self
            .bounded(
                self.provider
                    .score_resume(resume_text, job_title, job_description),
            )
            .await;

        match result {
            Ok(analysis) => {
                info!("Resume scored {}/100 for '{job_title}'", analysis.score);
                analysis
            }
            Err(e) => {
                warn!("Resume scoring failed for '{job_title}', using fallback score: {e}");
                fallback_analysis()
            }
        }
    }

    pub async fn profile_tips(&self, user: &User) -> String {
        self.bounded(self.provider.profile_tips(user))
            .await
            .unwrap_or_else(|e| {
                warn!("Profile tips failed for user {}: {e}", user.id);
                FALLBACK_PROFILE_TIPS.to_string()
            })
    }

    pub async fn suggest_reply(&self, incoming_message: &str, role_context: &str) -> String {
        self.bounded(self.provider.suggest_reply(incoming_message, role_context))
            .await
            .unwrap_or_else(|e| {
                warn!("Reply suggestion failed: {e}");
                FALLBACK_REPLY.to_string()
            })
    }

    pub async fn draft_email(&self, kind: EmailKind, candidate_name: &str, job_title: &str) -> String {
        self.bounded(self.provider.draft_email(kind, candidate_name, job_title))
            .await
            .unwrap_or_else(|e| {
                warn!("Email draft ({kind:?}) failed: {e}");
                fallback_email(candidate_name, job_title)
            })
    }

    pub async fn office_link(&self, company: &str, location: &str) -> String {
        self.bounded(self.provider.office_link(company, location))
            .await
            .unwrap_or_else(|e| {
                warn!("Office lookup failed for {company}: {e}");
                fallback_office_link(company, location)
            })
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, ProviderError>
    where
        F: Future<Output = Result<T, ProviderError>>,
    {
        tokio::time::timeout(self.timeout, call)
            .await
            .unwrap_or(Err(ProviderError::Timeout(self.timeout)))
    }
}

fn fallback_analysis() -> ResumeAnalysis {
    ResumeAnalysis {
        score: FALLBACK_ATS_SCORE,
        feedback: FALLBACK_FEEDBACK.to_string(),
        missing_skills: FALLBACK_MISSING_SKILLS.iter().map(|s| s.to_string()).collect(),
    }
}

fn fallback_email(candidate_name: &str, job_title: &str) -> String {
    format!("Hi {candidate_name}, regarding the {job_title} position, let's schedule a call.")
}

fn fallback_office_link(company: &str, location: &str) -> String {
    let query = format!("{company} {location}");
    Url::parse_with_params(MAPS_SEARCH_URL, [("api", "1"), ("query", query.as_str())])
        .map(String::from)
        .unwrap_or_else(|_| MAPS_SEARCH_URL.to_string())
}
