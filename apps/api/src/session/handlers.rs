//! Axum route handlers for the session API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ai::EmailKind;
use crate::catalog::JobFilter;
use crate::errors::AppError;
use crate::models::{Application, ApplicationStatus, Job, UserRole};
use crate::state::AppState;

use super::controller::SessionSnapshot;
use super::forms::JobForm;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct OpenSessionRequest {
    pub role: UserRole,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub snapshot: SessionSnapshot,
}

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub job_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct StatusChangeRequest {
    pub status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
pub struct ReplyRequest {
    pub message: String,
    pub role_context: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub application_id: Uuid,
    pub kind: EmailKind,
}

#[derive(Debug, Deserialize)]
pub struct OfficeLinkRequest {
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub text: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Session lifecycle
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_open_session(
    State(state): State<AppState>,
    Json(req): Json<OpenSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let (session_id, controller) = state.sessions.open(req.role).await?;
    let snapshot = controller.snapshot().await;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            session_id,
            snapshot,
        }),
    ))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let controller = state.sessions.get(session_id).await?;
    Ok(Json(controller.snapshot().await))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_close_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.close(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Catalog workflows
// ────────────────────────────────────────────────────────────────────────────

/// PUT /api/v1/sessions/:id/filter
pub async fn handle_set_filter(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(filter): Json<JobFilter>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let controller = state.sessions.get(session_id).await?;
    controller.set_filter(filter).await?;
    Ok(Json(controller.snapshot().await))
}

/// POST /api/v1/sessions/:id/refresh
pub async fn handle_refresh(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let controller = state.sessions.get(session_id).await?;
    controller.refresh().await?;
    Ok(Json(controller.snapshot().await))
}

/// POST /api/v1/sessions/:id/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(form): Json<JobForm>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let controller = state.sessions.get(session_id).await?;
    let job = controller.create_job(form).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// POST /api/v1/sessions/:id/applications
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    let controller = state.sessions.get(session_id).await?;
    let application = controller.apply(req.job_id).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// PATCH /api/v1/sessions/:id/applications/:app_id
pub async fn handle_change_status(
    State(state): State<AppState>,
    Path((session_id, app_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<StatusChangeRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let controller = state.sessions.get(session_id).await?;
    controller.change_status(app_id, req.status).await?;
    Ok(Json(controller.snapshot().await))
}

// ────────────────────────────────────────────────────────────────────────────
// Assist workflows
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/assist/tips
pub async fn handle_profile_tips(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<AssistResponse>, AppError> {
    let controller = state.sessions.get(session_id).await?;
    let text = controller.profile_tips().await?;
    Ok(Json(AssistResponse { text }))
}

/// POST /api/v1/sessions/:id/assist/reply
pub async fn handle_suggest_reply(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<ReplyRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    if req.message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    let controller = state.sessions.get(session_id).await?;
    let text = controller
        .suggest_reply(&req.message, &req.role_context)
        .await;
    Ok(Json(AssistResponse { text }))
}

/// POST /api/v1/sessions/:id/assist/email
pub async fn handle_draft_email(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<EmailRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    let controller = state.sessions.get(session_id).await?;
    let text = controller.draft_email(req.application_id, req.kind).await?;
    Ok(Json(AssistResponse { text }))
}

/// POST /api/v1/sessions/:id/assist/office-link
pub async fn handle_office_link(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<OfficeLinkRequest>,
) -> Result<Json<AssistResponse>, AppError> {
    let controller = state.sessions.get(session_id).await?;
    let text = controller.office_link(req.job_id).await?;
    Ok(Json(AssistResponse { text }))
}
