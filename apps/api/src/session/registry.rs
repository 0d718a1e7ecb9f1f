use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::ai::Assistant;
use crate::catalog::CatalogService;
use crate::errors::AppError;
use crate::models::UserRole;

use super::controller::WorkflowController;

struct SessionEntry {
    controller: Arc<WorkflowController>,
    last_seen: Instant,
}

/// Live sessions by id. Each session gets its own controller over the shared
/// catalog and assistant. A session untouched for `idle_ttl` is dropped: on
/// lookup, and in a sweep whenever a new session opens.
pub struct SessionRegistry {
    catalog: Arc<CatalogService>,
    assistant: Arc<Assistant>,
    idle_ttl: Duration,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl SessionRegistry {
    pub fn new(catalog: Arc<CatalogService>, assistant: Arc<Assistant>, idle_ttl: Duration) -> Self {
        Self {
            catalog,
            assistant,
            idle_ttl,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Starts a session signed in as `role`. Nothing is registered if the
    /// sign-in fails.
    pub async fn open(&self, role: UserRole) -> Result<(Uuid, Arc<WorkflowController>), AppError> {
        let controller = Arc::new(WorkflowController::new(
            self.catalog.clone(),
            self.assistant.clone(),
        ));
        controller.login(role).await?;

        let session_id = Uuid::new_v4();
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        let before = sessions.len();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) < self.idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("Evicted {evicted} idle sessions");
        }

        sessions.insert(
            session_id,
            SessionEntry {
                controller: controller.clone(),
                last_seen: now,
            },
        );
        info!("Opened session {session_id} ({})", role.label());

        Ok((session_id, controller))
    }

    /// Looks up a live session and marks it as used.
    pub async fn get(&self, session_id: Uuid) -> Result<Arc<WorkflowController>, AppError> {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        let Some(entry) = sessions.get_mut(&session_id) else {
            return Err(not_found(session_id));
        };
        if now.duration_since(entry.last_seen) >= self.idle_ttl {
            sessions.remove(&session_id);
            info!("Session {session_id} expired after {:?} idle", self.idle_ttl);
            return Err(not_found(session_id));
        }

        entry.last_seen = now;
        Ok(entry.controller.clone())
    }

    pub async fn close(&self, session_id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&session_id)
            .map(|_| info!("Closed session {session_id}"))
            .ok_or_else(|| not_found(session_id))
    }
}

fn not_found(session_id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {session_id} not found"))
}
