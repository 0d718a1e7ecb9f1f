//! Sequences one user's multi-step actions.
//!
//! Owns the session view (user, filter, visible jobs and applications) and
//! decides when to refresh it after a mutation. Store and provider calls may
//! finish in any order, so every job-list fetch carries a ticket and is only
//! applied if no newer fetch was issued after it.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::ai::{Assistant, EmailKind};
use crate::catalog::seed::demo_email;
use crate::catalog::{CatalogService, JobFilter};
use crate::errors::AppError;
use crate::models::{Application, ApplicationStatus, Job, User, UserRole};

use super::forms::{AssistantOutput, JobForm};

/// How long the success indicator stays up after a completed action.
pub const SUCCESS_INDICATOR_TTL: Duration = Duration::from_secs(3);

/// Job title used in drafted emails when the job is not in the current view.
const UNKNOWN_POSITION: &str = "Position";

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    filter: JobFilter,
    jobs: Vec<Job>,
    applications: Vec<Application>,
    success_until: Option<Instant>,
    assistant_output: Option<AssistantOutput>,
}

/// Everything a client needs to render the session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub user: Option<User>,
    pub filter: JobFilter,
    pub jobs: Vec<Job>,
    pub applications: Vec<Application>,
    /// Jobs the signed-in user has already applied to.
    pub applied_job_ids: Vec<Uuid>,
    pub busy: bool,
    pub success: bool,
    pub assistant_output: Option<AssistantOutput>,
}

/// Counts one in-flight workflow for as long as it lives. The session is
/// busy while any guard is alive, so overlapping workflows keep it raised
/// until the last one finishes.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn raise(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

pub struct WorkflowController {
    catalog: Arc<CatalogService>,
    assistant: Arc<Assistant>,
    state: Mutex<SessionState>,
    job_tickets: AtomicU64,
    application_tickets: AtomicU64,
    in_flight: AtomicUsize,
}

impl WorkflowController {
    pub fn new(catalog: Arc<CatalogService>, assistant: Arc<Assistant>) -> Self {
        Self {
            catalog,
            assistant,
            state: Mutex::new(SessionState::default()),
            job_tickets: AtomicU64::new(0),
            application_tickets: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Catalog workflows
    // ────────────────────────────────────────────────────────────────────────

    /// Signs in as the role's demo identity, then loads jobs and applications.
    pub async fn login(&self, role: UserRole) -> Result<User, AppError> {
        let _busy = BusyGuard::raise(&self.in_flight);

        let user = self.catalog.login(demo_email(role), role).await?;
        {
            let mut state = self.state.lock().await;
            state.user = Some(user.clone());
            state.assistant_output = None;
        }
        info!("Session signed in as {} ({})", user.id, role.label());

        self.reload().await?;
        Ok(user)
    }

    /// Records the filter and fetches the matching jobs once.
    /// Before sign-in only the filter is recorded.
    pub async fn set_filter(&self, filter: JobFilter) -> Result<(), AppError> {
        // Ticket and filter change together under the lock, so a fetch issued
        // later always sees this filter.
        let (ticket, signed_in) = {
            let mut state = self.state.lock().await;
            state.filter = filter.clone();
            (next_ticket(&self.job_tickets), state.user.is_some())
        };
        if !signed_in {
            return Ok(());
        }

        let _busy = BusyGuard::raise(&self.in_flight);
        self.fetch_jobs(ticket, &filter).await
    }

    /// Reloads jobs (under the current filter) and applications.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let _busy = BusyGuard::raise(&self.in_flight);
        self.reload().await
    }

    /// Applies the signed-in user to a job from the current view, then
    /// refreshes jobs and applications whether or not scoring fell back.
    pub async fn apply(&self, job_id: Uuid) -> Result<Application, AppError> {
        let _busy = BusyGuard::raise(&self.in_flight);

        let (candidate, job) = {
            let state = self.state.lock().await;
            let job = state.jobs.iter().find(|j| j.id == job_id).cloned();
            (state.user.clone(), job)
        };

        let application = self.catalog.apply(candidate.as_ref(), job.as_ref()).await?;
        self.reload().await?;
        self.flash_success().await;
        Ok(application)
    }

    /// Publishes a posting from the HR form, then refreshes.
    pub async fn create_job(&self, form: JobForm) -> Result<Job, AppError> {
        let _busy = BusyGuard::raise(&self.in_flight);

        let job = self.catalog.create_job(form.into_new_job()).await?;
        self.reload().await?;
        self.flash_success().await;
        Ok(job)
    }

    /// Changes an application's status, then refreshes applications.
    pub async fn change_status(
        &self,
        app_id: Uuid,
        status: ApplicationStatus,
    ) -> Result<(), AppError> {
        let _busy = BusyGuard::raise(&self.in_flight);

        self.catalog.set_application_status(app_id, status).await?;
        self.reload_applications().await?;
        self.flash_success().await;
        Ok(())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Assist workflows (never fail on provider errors)
    // ────────────────────────────────────────────────────────────────────────

    pub async fn profile_tips(&self) -> Result<String, AppError> {
        let user = self
            .state
            .lock()
            .await
            .user
            .clone()
            .ok_or_else(|| AppError::Validation("Sign in to get profile tips".to_string()))?;

        let _busy = BusyGuard::raise(&self.in_flight);
        let text = self.assistant.profile_tips(&user).await;
        self.remember(AssistantOutput::ProfileTips { text: text.clone() })
            .await;
        Ok(text)
    }

    pub async fn suggest_reply(&self, incoming_message: &str, role_context: &str) -> String {
        let _busy = BusyGuard::raise(&self.in_flight);
        let text = self
            .assistant
            .suggest_reply(incoming_message, role_context)
            .await;
        self.remember(AssistantOutput::Reply { text: text.clone() })
            .await;
        text
    }

    /// Drafts an offer or interview email for an application in the view.
    pub async fn draft_email(&self, app_id: Uuid, kind: EmailKind) -> Result<String, AppError> {
        let (candidate_name, job_title) = {
            let state = self.state.lock().await;
            let application = state
                .applications
                .iter()
                .find(|a| a.id == app_id)
                .ok_or_else(|| AppError::NotFound(format!("Application {app_id} not found")))?;
            let job_title = state
                .jobs
                .iter()
                .find(|j| j.id == application.job_id)
                .map(|j| j.title.clone())
                .unwrap_or_else(|| UNKNOWN_POSITION.to_string());
            (application.candidate_name.clone(), job_title)
        };

        let _busy = BusyGuard::raise(&self.in_flight);
        let text = self
            .assistant
            .draft_email(kind, &candidate_name, &job_title)
            .await;
        self.remember(AssistantOutput::Email {
            application_id: app_id,
            email_kind: kind,
            text: text.clone(),
        })
        .await;
        Ok(text)
    }

    /// Map link for the office of a job in the view.
    pub async fn office_link(&self, job_id: Uuid) -> Result<String, AppError> {
        let company = self
            .state
            .lock()
            .await
            .jobs
            .iter()
            .find(|j| j.id == job_id)
            .map(|j| j.company.clone())
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;

        let _busy = BusyGuard::raise(&self.in_flight);
        let url = self
            .assistant
            .office_link(&company.name, &company.location)
            .await;
        self.remember(AssistantOutput::OfficeLink {
            job_id,
            url: url.clone(),
        })
        .await;
        Ok(url)
    }

    // ────────────────────────────────────────────────────────────────────────
    // View
    // ────────────────────────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> SessionSnapshot {
        let state = self.state.lock().await;

        let applied_job_ids = match &state.user {
            Some(user) => state
                .applications
                .iter()
                .filter(|a| a.candidate_id == user.id)
                .map(|a| a.job_id)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            None => Vec::new(),
        };

        SessionSnapshot {
            user: state.user.clone(),
            filter: state.filter.clone(),
            jobs: state.jobs.clone(),
            applications: state.applications.clone(),
            applied_job_ids,
            busy: self.in_flight.load(Ordering::SeqCst) > 0,
            success: state
                .success_until
                .map_or(false, |until| Instant::now() < until),
            assistant_output: state.assistant_output.clone(),
        }
    }

    // ────────────────────────────────────────────────────────────────────────
    // Internals
    // ────────────────────────────────────────────────────────────────────────

    async fn reload(&self) -> Result<(), AppError> {
        let (ticket, signed_in, filter) = {
            let state = self.state.lock().await;
            (
                next_ticket(&self.job_tickets),
                state.user.is_some(),
                state.filter.clone(),
            )
        };
        if !signed_in {
            return Ok(());
        }

        self.fetch_jobs(ticket, &filter).await?;
        self.reload_applications().await
    }

    async fn fetch_jobs(&self, ticket: u64, filter: &JobFilter) -> Result<(), AppError> {
        let jobs = self.catalog.list_jobs(filter).await?;

        let mut state = self.state.lock().await;
        if is_current(&self.job_tickets, ticket) {
            state.jobs = jobs;
        } else {
            debug!("Discarding job list for superseded fetch #{ticket}");
        }
        Ok(())
    }

    async fn reload_applications(&self) -> Result<(), AppError> {
        let ticket = next_ticket(&self.application_tickets);
        let Some(user_id) = self.state.lock().await.user.as_ref().map(|u| u.id) else {
            return Ok(());
        };

        let applications = self.catalog.list_applications(user_id).await?;

        let mut state = self.state.lock().await;
        if is_current(&self.application_tickets, ticket) {
            state.applications = applications;
        } else {
            debug!("Discarding application list for superseded fetch #{ticket}");
        }
        Ok(())
    }

    async fn flash_success(&self) {
        self.state.lock().await.success_until = Some(Instant::now() + SUCCESS_INDICATOR_TTL);
    }

    async fn remember(&self, output: AssistantOutput) {
        self.state.lock().await.assistant_output = Some(output);
    }
}

fn next_ticket(counter: &AtomicU64) -> u64 {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

fn is_current(counter: &AtomicU64, ticket: u64) -> bool {
    counter.load(Ordering::SeqCst) == ticket
}
