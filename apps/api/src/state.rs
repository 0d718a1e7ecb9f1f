use std::sync::Arc;

use crate::session::SessionRegistry;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Live workflow sessions over the shared catalog and assistant.
    pub sessions: Arc<SessionRegistry>,
}
