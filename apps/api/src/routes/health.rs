use axum::Json;
use serde_json::{json, Value};

use crate::models::DOMAINS;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "nexus-portal"
    }))
}

/// GET /api/v1/domains
/// Domain facets for the job filter, wildcard first.
pub async fn domains_handler() -> Json<Vec<&'static str>> {
    Json(DOMAINS.to_vec())
}
