//! Job and application CRUD over the document store.
//!
//! Holds no copy of any collection: every operation re-reads what it needs and
//! writes whole collections back. Refreshing views after a mutation is the
//! caller's business (see `session::WorkflowController`).

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ai::Assistant;
use crate::errors::AppError;
use crate::models::{Application, ApplicationStatus, Job, NewJob, User, UserRole};
use crate::store::{load, persist, Collection, DocumentStore};

use super::filter::JobFilter;
use super::seed::{demo_profile, seed_job};

/// Placeholder CV reference attached to every application.
const RESUME_URL: &str = "profile_cv.pdf";

pub struct CatalogService {
    store: Arc<dyn DocumentStore>,
    assistant: Arc<Assistant>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn DocumentStore>, assistant: Arc<Assistant>) -> Self {
        Self { store, assistant }
    }

    /// Find-or-create by (email, role). New accounts get the role's demo profile.
    pub async fn login(&self, email: &str, role: UserRole) -> Result<User, AppError> {
        let mut users: Vec<User> = load(self.store.as_ref(), Collection::Users).await?;

        if let Some(existing) = users.iter().find(|u| u.email == email && u.role == role) {
            debug!("Login for existing {} user {}", role.label(), existing.id);
            return Ok(existing.clone());
        }

        let user = demo_profile(email, role);
        users.push(user.clone());
        persist(self.store.as_ref(), Collection::Users, &users).await?;

        info!("Created {} account {} for {email}", role.label(), user.id);
        Ok(user)
    }

    /// Jobs matching `filter`, most recent first. An empty collection is
    /// seeded with the demo posting (and persisted) before filtering.
    pub async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, AppError> {
        let mut jobs: Vec<Job> = load(self.store.as_ref(), Collection::Jobs).await?;

        if jobs.is_empty() {
            info!("Jobs collection empty, seeding demo posting");
            jobs = vec![seed_job()];
            persist(self.store.as_ref(), Collection::Jobs, &jobs).await?;
        }

        jobs.retain(|job| filter.matches(job));
        Ok(jobs)
    }

    pub async fn create_job(&self, input: NewJob) -> Result<Job, AppError> {
        if input.title.trim().is_empty() {
            return Err(AppError::Validation("Job title cannot be empty".to_string()));
        }

        let job = input.into_job(Uuid::new_v4(), Utc::now());
        let mut jobs: Vec<Job> = load(self.store.as_ref(), Collection::Jobs).await?;
        jobs.insert(0, job.clone());
        persist(self.store.as_ref(), Collection::Jobs, &jobs).await?;

        info!("Posted job {} '{}' ({})", job.id, job.title, job.domain);
        Ok(job)
    }

    /// Every application in the store.
    ///
    /// `viewer_id` is accepted but not used for scoping: there is no model of
    /// which employer owns which job, so HR users see all applications.
    pub async fn list_applications(&self, viewer_id: Uuid) -> Result<Vec<Application>, AppError> {
        let applications: Vec<Application> =
            load(self.store.as_ref(), Collection::Applications).await?;
        debug!(
            "Listing {} applications for viewer {viewer_id}",
            applications.len()
        );
        Ok(applications)
    }

    /// Scores the candidate against the job and records a pending application.
    ///
    /// Scoring never fails the apply; a provider failure yields the fallback
    /// score. Applying twice creates two applications.
    pub async fn apply(
        &self,
        candidate: Option<&User>,
        job: Option<&Job>,
    ) -> Result<Application, AppError> {
        let (candidate, job) = match (candidate, job) {
            (Some(c), Some(j)) => (c, j),
            (None, _) => {
                return Err(AppError::Validation(
                    "A signed-in candidate is required to apply".to_string(),
                ))
            }
            (_, None) => {
                return Err(AppError::Validation(
                    "A job is required to apply".to_string(),
                ))
            }
        };

        let jobs: Vec<Job> = load(self.store.as_ref(), Collection::Jobs).await?;
        if !jobs.iter().any(|j| j.id == job.id) {
            return Err(AppError::Validation(format!(
                "Job {} is no longer listed",
                job.id
            )));
        }

        let analysis = self
            .assistant
            .score_resume(&candidate.scoring_text(), &job.title, &job.description)
            .await;

        let application = Application {
            id: Uuid::new_v4(),
            job_id: job.id,
            candidate_id: candidate.id,
            candidate_name: candidate.name.clone(),
            status: ApplicationStatus::Pending,
            applied_at: Utc::now().date_naive(),
            resume_url: RESUME_URL.to_string(),
            ats_score: analysis.score,
            ai_feedback: analysis.feedback,
            missing_skills: analysis.missing_skills,
        };

        let mut applications: Vec<Application> =
            load(self.store.as_ref(), Collection::Applications).await?;
        applications.insert(0, application.clone());
        persist(
            self.store.as_ref(),
            Collection::Applications,
            &applications,
        )
        .await?;

        info!(
            "Candidate {} applied to job {} (ATS {})",
            candidate.id, job.id, application.ats_score
        );
        Ok(application)
    }

    /// Replaces the status of one application. Unknown ids are `NotFound`.
    /// Any status may follow any other.
    pub async fn set_application_status(
        &self,
        app_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<(), AppError> {
        let mut applications: Vec<Application> =
            load(self.store.as_ref(), Collection::Applications).await?;

        let application = applications
            .iter_mut()
            .find(|a| a.id == app_id)
            .ok_or_else(|| AppError::NotFound(format!("Application {app_id} not found")))?;
        let previous = application.status;
        application.status = status;

        persist(
            self.store.as_ref(),
            Collection::Applications,
            &applications,
        )
        .await?;

        info!(
            "Application {app_id}: {} -> {}",
            previous.label(),
            status.label()
        );
        Ok(())
    }
}
