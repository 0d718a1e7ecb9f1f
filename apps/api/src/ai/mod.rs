//! Scoring and drafting operations backed by an external model.
//!
//! `AiProvider` is the seam: `LlmAiProvider` is the production backend, tests
//! substitute canned or failing providers. Callers never use a provider
//! directly; they go through `Assistant`, which bounds every call with a
//! timeout and swaps any `ProviderError` for a fixed fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::llm_client::LlmError;
use crate::models::User;

pub mod assistant;
pub mod llm;
pub mod prompts;

pub use assistant::Assistant;
pub use llm::LlmAiProvider;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Malformed provider output: {0}")]
    Malformed(String),

    #[error("Provider did not answer within {0:?}")]
    Timeout(std::time::Duration),
}

/// Resume-to-job fit as judged by the provider (or the fallback).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysis {
    /// ATS score, 0–100.
    pub score: u8,
    pub feedback: String,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    Offer,
    Interview,
}

#[async_trait]
pub trait AiProvider: Send + Sync {
    async fn score_resume(
        &self,
        resume_text: &str,
        job_title: &str,
        job_description: &str,
    ) -> Result<ResumeAnalysis, ProviderError>;

    async fn profile_tips(&self, user: &User) -> Result<String, ProviderError>;

    async fn suggest_reply(
        &self,
        incoming_message: &str,
        role_context: &str,
    ) -> Result<String, ProviderError>;

    async fn draft_email(
        &self,
        kind: EmailKind,
        candidate_name: &str,
        job_title: &str,
    ) -> Result<String, ProviderError>;

    /// A map link for the company's office in `location`.
    async fn office_link(&self, company: &str, location: &str) -> Result<String, ProviderError>;
}
