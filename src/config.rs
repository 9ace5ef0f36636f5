use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::usecase::services::refresh::DEFAULT_REFRESH;

pub const API_URL_VAR: &str = "AUDIT_CONSOLE_API_URL";
pub const API_KEY_VAR: &str = "AUDIT_CONSOLE_API_KEY";
pub const SESSION_TOKEN_VAR: &str = "AUDIT_CONSOLE_SESSION_TOKEN";
pub const REFRESH_SECS_VAR: &str = "AUDIT_CONSOLE_REFRESH_SECS";

const DEV_API_URL: &str = "http://localhost:3000";

#[derive(Clone, PartialEq, Eq)]
pub enum AuthConfig {
    SessionToken(String),
    /// Static key, kept for servers that have not moved to sessions yet.
    ApiKey(String),
    Anonymous,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::SessionToken(_) => f.write_str("SessionToken(***)"),
            AuthConfig::ApiKey(_) => f.write_str("ApiKey(***)"),
            AuthConfig::Anonymous => f.write_str("Anonymous"),
        }
    }
}

impl AuthConfig {
    /// Lower-case header name and value to attach to every request.
    pub fn header(&self) -> Option<(&'static str, String)> {
        match self {
            AuthConfig::SessionToken(token) => Some(("authorization", format!("Bearer {token}"))),
            AuthConfig::ApiKey(key) => Some(("x-api-key", key.clone())),
            AuthConfig::Anonymous => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub auth: AuthConfig,
    pub refresh_interval: Duration,
}

impl AppConfig {
    /// Environment first (a `.env` file is honoured), then values baked in at
    /// build time.
    pub fn load() -> Result<Self> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|name| {
            std::env::var(name).ok().or_else(|| build_time_value(name))
        })
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let api_base_url = match value(API_URL_VAR) {
            Some(raw) => parse_base_url(&raw)
                .with_context(|| format!("{API_URL_VAR} is not a valid URL: {raw}"))?,
            None => {
                tracing::warn!("{API_URL_VAR} not set, using development default {DEV_API_URL}");
                parse_base_url(DEV_API_URL)?
            }
        };

        let auth = match (value(SESSION_TOKEN_VAR), value(API_KEY_VAR)) {
            (Some(token), _) => AuthConfig::SessionToken(token),
            (None, Some(key)) => {
                tracing::warn!("authenticating with a static API key; prefer {SESSION_TOKEN_VAR}");
                AuthConfig::ApiKey(key)
            }
            (None, None) => {
                tracing::warn!("no credentials configured; requests will be sent unauthenticated");
                AuthConfig::Anonymous
            }
        };

        let refresh_interval = match value(REFRESH_SECS_VAR) {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .with_context(|| format!("{REFRESH_SECS_VAR} must be a whole number of seconds"))?,
            None => DEFAULT_REFRESH,
        };

        Ok(Self {
            api_base_url,
            auth,
            refresh_interval,
        })
    }
}

fn build_time_value(name: &str) -> Option<String> {
    match name {
        API_URL_VAR => option_env!("AUDIT_CONSOLE_API_URL"),
        API_KEY_VAR => option_env!("AUDIT_CONSOLE_API_KEY"),
        SESSION_TOKEN_VAR => option_env!("AUDIT_CONSOLE_SESSION_TOKEN"),
        REFRESH_SECS_VAR => option_env!("AUDIT_CONSOLE_REFRESH_SECS"),
        _ => None,
    }
    .map(str::to_string)
}

/// The base URL keeps no trailing slash so `/audit/...` joins cleanly.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).with_context(|| format!("invalid base url: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("unsupported scheme in base url: {}", url.scheme());
    }
    Ok(url)
}
