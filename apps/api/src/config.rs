use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_AI_TIMEOUT_SECS: u64 = 30;
const DEFAULT_STORE_NAMESPACE: &str = "nexus";
const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

/// Application configuration loaded from environment variables.
/// Everything has a default; a malformed number fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Empty means every assistant call takes its fallback.
    pub anthropic_api_key: String,
    pub ai_timeout: Duration,
    /// Sessions untouched for this long are dropped.
    pub session_idle_ttl: Duration,
    /// Absent means the in-memory document store.
    pub redis_url: Option<String>,
    pub store_namespace: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let ai_timeout_secs = match optional_env("AI_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("AI_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_AI_TIMEOUT_SECS,
        };

        let session_idle_secs = match optional_env("SESSION_IDLE_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("SESSION_IDLE_SECS must be a whole number of seconds")?,
            None => DEFAULT_SESSION_IDLE_SECS,
        };

        Ok(Config {
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY").unwrap_or_default(),
            ai_timeout: Duration::from_secs(ai_timeout_secs),
            session_idle_ttl: Duration::from_secs(session_idle_secs),
            redis_url: optional_env("REDIS_URL"),
            store_namespace: optional_env("STORE_NAMESPACE")
                .unwrap_or_else(|| DEFAULT_STORE_NAMESPACE.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Unset and blank are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
