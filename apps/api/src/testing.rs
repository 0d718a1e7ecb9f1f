//! Shared fakes for unit tests: canned/failing AI providers and store wrappers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::ai::{AiProvider, Assistant, EmailKind, ProviderError, ResumeAnalysis};
use crate::catalog::CatalogService;
use crate::llm_client::LlmError;
use crate::models::{User, UserRole};
use crate::store::{Collection, DocumentStore, MemoryDocumentStore, StoreError};

pub fn demo_candidate() -> User {
    User {
        id: Uuid::new_v4(),
        name: "Arjun Sharma".to_string(),
        email: "arjun.dev@gmail.com".to_string(),
        role: UserRole::Candidate,
        avatar: None,
        location: Some("Bangalore, India".to_string()),
        designation: Some("Senior Full Stack Developer".to_string()),
        experience: Some("6 Years".to_string()),
        skills: vec!["React".to_string(), "Node.js".to_string()],
        resume_text: Some("Builds scalable React apps.".to_string()),
    }
}

pub fn catalog_with(
    store: Arc<dyn DocumentStore>,
    provider: Arc<dyn AiProvider>,
) -> Arc<CatalogService> {
    let assistant = Arc::new(Assistant::new(provider, Duration::from_secs(5)));
    Arc::new(CatalogService::new(store, assistant))
}

/// Answers every call with fixed content.
pub struct CannedProvider {
    score: u8,
    pub score_calls: AtomicUsize,
}

impl CannedProvider {
    pub const FEEDBACK: &'static str = "Strong React background.";
    pub const TEXT: &'static str = "canned text";
    pub const LINK: &'static str = "https://maps.example.com/office";

    pub fn scoring(score: u8) -> Self {
        Self {
            score,
            score_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AiProvider for CannedProvider {
    async fn score_resume(&self, _: &str, _: &str, _: &str) -> Result<ResumeAnalysis, ProviderError> {
        self.score_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ResumeAnalysis {
            score: self.score,
            feedback: Self::FEEDBACK.to_string(),
            missing_skills: vec!["GraphQL".to_string()],
        })
    }

    async fn profile_tips(&self, _: &User) -> Result<String, ProviderError> {
        Ok(Self::TEXT.to_string())
    }

    async fn suggest_reply(&self, _: &str, _: &str) -> Result<String, ProviderError> {
        Ok(Self::TEXT.to_string())
    }

    async fn draft_email(&self, kind: EmailKind, name: &str, job: &str) -> Result<String, ProviderError> {
        Ok(format!("{kind:?} for {name} / {job}"))
    }

    async fn office_link(&self, _: &str, _: &str) -> Result<String, ProviderError> {
        Ok(Self::LINK.to_string())
    }
}

/// Fails every call as an unreachable endpoint would.
pub struct FailingProvider;

fn unreachable_endpoint() -> ProviderError {
    ProviderError::Llm(LlmError::Api {
        status: 503,
        message: "endpoint unavailable".to_string(),
    })
}

#[async_trait]
impl AiProvider for FailingProvider {
    async fn score_resume(&self, _: &str, _: &str, _: &str) -> Result<ResumeAnalysis, ProviderError> {
        Err(unreachable_endpoint())
    }

    async fn profile_tips(&self, _: &User) -> Result<String, ProviderError> {
        Err(unreachable_endpoint())
    }

    async fn suggest_reply(&self, _: &str, _: &str) -> Result<String, ProviderError> {
        Err(unreachable_endpoint())
    }

    async fn draft_email(&self, _: EmailKind, _: &str, _: &str) -> Result<String, ProviderError> {
        Err(unreachable_endpoint())
    }

    async fn office_link(&self, _: &str, _: &str) -> Result<String, ProviderError> {
        Err(unreachable_endpoint())
    }
}

/// Never answers.
pub struct StalledProvider;

#[async_trait]
impl AiProvider for StalledProvider {
    async fn score_resume(&self, _: &str, _: &str, _: &str) -> Result<ResumeAnalysis, ProviderError> {
        std::future::pending().await
    }

    async fn profile_tips(&self, _: &User) -> Result<String, ProviderError> {
        std::future::pending().await
    }

    async fn suggest_reply(&self, _: &str, _: &str) -> Result<String, ProviderError> {
        std::future::pending().await
    }

    async fn draft_email(&self, _: EmailKind, _: &str, _: &str) -> Result<String, ProviderError> {
        std::future::pending().await
    }

    async fn office_link(&self, _: &str, _: &str) -> Result<String, ProviderError> {
        std::future::pending().await
    }
}

/// In-memory store whose reads of the jobs collection sleep for queued
/// delays, so tests can make an earlier fetch finish after a later one.
#[derive(Default)]
pub struct DelayedStore {
    inner: MemoryDocumentStore,
    job_read_delays: Mutex<VecDeque<Duration>>,
    pub job_reads: AtomicUsize,
}

impl DelayedStore {
    pub fn queue_job_read_delays(&self, delays: &[Duration]) {
        self.job_read_delays
            .lock()
            .unwrap()
            .extend(delays.iter().copied());
    }
}

#[async_trait]
impl DocumentStore for DelayedStore {
    async fn get(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        if collection == Collection::Jobs {
            self.job_reads.fetch_add(1, Ordering::SeqCst);
            let delay = self.job_read_delays.lock().unwrap().pop_front();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
        }
        self.inner.get(collection).await
    }

    async fn save(&self, collection: Collection, records: Vec<Value>) -> Result<(), StoreError> {
        self.inner.save(collection, records).await
    }
}

/// In-memory store that refuses writes to one collection.
pub struct ReadOnlyCollectionStore {
    inner: MemoryDocumentStore,
    locked: Collection,
}

impl ReadOnlyCollectionStore {
    pub fn new(locked: Collection) -> Self {
        Self {
            inner: MemoryDocumentStore::new(),
            locked,
        }
    }
}

#[async_trait]
impl DocumentStore for ReadOnlyCollectionStore {
    async fn get(&self, collection: Collection) -> Result<Vec<Value>, StoreError> {
        self.inner.get(collection).await
    }

    async fn save(&self, collection: Collection, records: Vec<Value>) -> Result<(), StoreError> {
        if collection == self.locked {
            return Err(StoreError::Corrupt(collection.key()));
        }
        self.inner.save(collection, records).await
    }
}
