use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use shortlink_client::DEFAULT_API_URL;

const DEFAULT_SESSION_FILE: &str = ".shortlink_session.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub session_file: PathBuf,
    pub log_level: String,
    pub http_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("SHORTLINK_API_URL")
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let session_file = lookup("SHORTLINK_SESSION_FILE")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string())
            .into();
        let log_level = lookup("LOG_LEVEL")
            .or_else(|| lookup("RUST_LOG"))
            .unwrap_or_else(|| "warn".to_string());
        let http_timeout_secs = parse_u64(
            "SHORTLINK_HTTP_TIMEOUT_SECS",
            lookup("SHORTLINK_HTTP_TIMEOUT_SECS"),
            15,
        )?;

        Ok(Self {
            api_url,
            session_file,
            log_level,
            http_timeout: Duration::from_secs(http_timeout_secs),
        })
    }
}

fn parse_u64(key: &str, raw: Option<String>, default: u64) -> Result<u64> {
    let value = raw
        .unwrap_or_else(|| default.to_string())
        .trim()
        .parse::<u64>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == 0 {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
