pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/domains", get(health::domains_handler))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_open_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_close_session),
        )
        .route("/api/v1/sessions/:id/filter", put(handlers::handle_set_filter))
        .route("/api/v1/sessions/:id/refresh", post(handlers::handle_refresh))
        // Catalog workflows
        .route("/api/v1/sessions/:id/jobs", post(handlers::handle_create_job))
        .route(
            "/api/v1/sessions/:id/applications",
            post(handlers::handle_apply),
        )
        .route(
            "/api/v1/sessions/:id/applications/:app_id",
            axum::routing::patch(handlers::handle_change_status),
        )
        // Assist workflows
        .route(
            "/api/v1/sessions/:id/assist/tips",
            post(handlers::handle_profile_tips),
        )
        .route(
            "/api/v1/sessions/:id/assist/reply",
            post(handlers::handle_suggest_reply),
        )
        .route(
            "/api/v1/sessions/:id/assist/email",
            post(handlers::handle_draft_email),
        )
        .route(
            "/api/v1/sessions/:id/assist/office-link",
            post(handlers::handle_office_link),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::ai::Assistant;
    use crate::session::SessionRegistry;
    use crate::store::MemoryDocumentStore;
    use crate::testing::{catalog_with, FailingProvider};

    fn app() -> Router {
        let provider = Arc::new(FailingProvider);
        let catalog = catalog_with(Arc::new(MemoryDocumentStore::new()), provider.clone());
        let assistant = Arc::new(Assistant::new(provider, Duration::from_secs(5)));
        build_router(AppState {
            sessions: Arc::new(SessionRegistry::new(
                catalog,
                assistant,
                Duration::from_secs(600),
            )),
        })
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn open(app: &Router, role: &str) -> String {
        let (status, body) = send(app, Method::POST, "/api/v1/sessions", Some(json!({"role": role}))).await;
        assert_eq!(status, StatusCode::CREATED);
        body["session_id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_health_and_domains() {
        let app = app();
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&app, Method::GET, "/api/v1/domains", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0], "All Domains");
    }

    #[tokio::test]
    async fn test_candidate_apply_flow_over_http() {
        let app = app();
        let session = open(&app, "CANDIDATE").await;

        let (_, snapshot) = send(&app, Method::GET, &format!("/api/v1/sessions/{session}"), None).await;
        let job_id = snapshot["jobs"][0]["id"].as_str().unwrap().to_string();
        assert_eq!(snapshot["user"]["role"], "CANDIDATE");

        let (status, application) = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{session}/applications"),
            Some(json!({"job_id": job_id})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(application["status"], "pending");
        assert_eq!(application["atsScore"], 65);

        let (_, snapshot) = send(&app, Method::GET, &format!("/api/v1/sessions/{session}"), None).await;
        assert_eq!(snapshot["applications"].as_array().unwrap().len(), 1);
        assert_eq!(snapshot["applied_job_ids"][0], job_id.as_str());
        assert_eq!(snapshot["success"], true);
        assert_eq!(snapshot["busy"], false);
    }

    #[tokio::test]
    async fn test_hr_posts_job_and_filters() {
        let app = app();
        let session = open(&app, "HR").await;

        let (status, job) = send(
            &app,
            Method::POST,
            &format!("/api/v1/sessions/{session}/jobs"),
            Some(json!({"title": "Tax Analyst", "domain": "Finance", "location": "Mumbai"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(job["filledVacancies"], 0);

        let (status, snapshot) = send(
            &app,
            Method::PUT,
            &format!("/api/v1/sessions/{session}/filter"),
            Some(json!({"domain": "Finance"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let jobs = snapshot["jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0]["title"], "Tax Analyst");
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let app = app();
        let uri = format!("/api/v1/sessions/{}", uuid::Uuid::new_v4());
        let (status, body) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_status_change_on_unknown_application_is_404() {
        let app = app();
        let session = open(&app, "HR").await;
        let uri = format!(
            "/api/v1/sessions/{session}/applications/{}",
            uuid::Uuid::new_v4()
        );
        let (status, _) = send(&app, Method::PATCH, &uri, Some(json!({"status": "hired"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_assist_reply_falls_back_and_rejects_blank() {
        let app = app();
        let session = open(&app, "CANDIDATE").await;
        let uri = format!("/api/v1/sessions/{session}/assist/reply");

        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(json!({"message": "Would you like a call?", "role_context": "Architect"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["text"].as_str().unwrap().starts_with("Thank you for reaching out"));

        let (status, body) = send(
            &app,
            Method::POST,
            &uri,
            Some(json!({"message": "  ", "role_context": "Architect"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_close_session() {
        let app = app();
        let session = open(&app, "HR").await;
        let uri = format!("/api/v1/sessions/{session}");

        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
