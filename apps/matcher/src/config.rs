use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;

/// Client configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub state_path: PathBuf,
    pub redirect_delay: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let redirect_delay_ms = match std::env::var("MATCHER_REDIRECT_DELAY_MS") {
            Ok(raw) => raw
                .parse::<u64>()
                .context("MATCHER_REDIRECT_DELAY_MS must be a whole number of milliseconds")?,
            Err(_) => DEFAULT_REDIRECT_DELAY_MS,
        };

        Ok(Config {
            api_base_url: normalize_base_url(&require_env("MATCHER_API_BASE_URL")?),
            state_path: std::env::var("MATCHER_STATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_state_path()),
            redirect_delay: Duration::from_millis(redirect_delay_ms),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// `<data_local_dir>/matcher/session.json`, or `.matcher/session.json` in the working
/// directory when the platform has no data directory.
fn default_state_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("matcher"))
        .unwrap_or_else(|| PathBuf::from(".matcher"))
        .join("session.json")
}
