use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, RECRUITING_WRITER_SYSTEM, URL_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::User;

use super::prompts::{
    email_prompt, office_link_prompt, profile_tips_prompt, reply_prompt, resume_score_prompt,
};
use super::{AiProvider, EmailKind, ProviderError, ResumeAnalysis};

/// Provider backed by the shared `LlmClient`.
pub struct LlmAiProvider {
    llm: LlmClient,
}

impl LlmAiProvider {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

/// Scoring output as the model writes it, before range checks.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    score: f64,
    feedback: String,
    #[serde(default, alias = "missing_skills")]
    missing_skills: Vec<String>,
}

#[async_trait]
impl AiProvider for LlmAiProvider {
    async fn score_resume(
        &self,
        resume_text: &str,
        job_title: &str,
        job_description: &str,
    ) -> Result<ResumeAnalysis, ProviderError> {
        let prompt = resume_score_prompt(resume_text, job_title, job_description);
        let raw: RawAnalysis = self.llm.call_json(&prompt, JSON_ONLY_SYSTEM).await?;
        normalize_analysis(raw)
    }

    async fn profile_tips(&self, user: &User) -> Result<String, ProviderError> {
        let prompt = profile_tips_prompt(user);
        Ok(self.llm.call_text(&prompt, RECRUITING_WRITER_SYSTEM).await?)
    }

    async fn suggest_reply(
        &self,
        incoming_message: &str,
        role_context: &str,
    ) -> Result<String, ProviderError> {
        let prompt = reply_prompt(incoming_message, role_context);
        Ok(self.llm.call_text(&prompt, RECRUITING_WRITER_SYSTEM).await?)
    }

    async fn draft_email(
        &self,
        kind: EmailKind,
        candidate_name: &str,
        job_title: &str,
    ) -> Result<String, ProviderError> {
        let prompt = email_prompt(kind, candidate_name, job_title);
        Ok(self.llm.call_text(&prompt, RECRUITING_WRITER_SYSTEM).await?)
    }

    async fn office_link(&self, company: &str, location: &str) -> Result<String, ProviderError> {
        let prompt = office_link_prompt(company, location);
        let text = self.llm.call_text(&prompt, URL_ONLY_SYSTEM).await?;
        extract_link(&text)
    }
}

fn normalize_analysis(raw: RawAnalysis) -> Result<ResumeAnalysis, ProviderError> {
    if !raw.score.is_finite() {
        return Err(ProviderError::Malformed(format!(
            "score is not a number: {}",
            raw.score
        )));
    }
    let feedback = raw.feedback.trim();
    if feedback.is_empty() {
        return Err(ProviderError::Malformed("empty feedback".to_string()));
    }

    Ok(ResumeAnalysis {
        score: raw.score.clamp(0.0, 100.0).round() as u8,
        feedback: feedback.to_string(),
        missing_skills: raw
            .missing_skills
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    })
}

/// First token of the reply, accepted only if it is an absolute http(s) URL.
fn extract_link(text: &str) -> Result<String, ProviderError> {
    let candidate = text
        .split_whitespace()
        .next()
        .map(|t| t.trim_matches(|c| c == '<' || c == '>' || c == '"'))
        .unwrap_or_default();

    let url = Url::parse(candidate)
        .map_err(|e| ProviderError::Malformed(format!("not a URL ({e}): {candidate:?}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        other => Err(ProviderError::Malformed(format!(
            "unsupported URL scheme: {other}"
        ))),
    }
}
