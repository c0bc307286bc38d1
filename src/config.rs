use std::net::SocketAddr;
use std::time::Duration;

use crate::workflow::ExplanationPolicy;

/// Application-level constants
pub const APP_NAME: &str = "MedAI Explain";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable holding the prediction service base URL.
pub const BACKEND_URL_VAR: &str = "MEDAI_BACKEND_URL";
/// Per-call timeout for the prediction service, in seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "MEDAI_REQUEST_TIMEOUT_SECS";
/// Address the local session API binds to.
pub const BIND_ADDR_VAR: &str = "MEDAI_BIND_ADDR";
/// Whether an assessment without an explanation is discarded.
pub const REQUIRE_EXPLANATION_VAR: &str = "MEDAI_REQUIRE_EXPLANATION";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "medai_explain_lib=info,tower_http=info"
}

/// Runtime settings resolved from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the prediction service, without trailing slash.
    pub backend_url: String,
    pub request_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub explanation_policy: ExplanationPolicy,
}

impl AppConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// The backend URL has no default: a missing value is an error
    /// rather than a silent fallback to localhost.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(BACKEND_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingBackendUrl)?;
        let backend_url = parse_backend_url(&raw_url)?;

        let request_timeout = match lookup(REQUEST_TIMEOUT_VAR) {
            Some(raw) => {
                let secs: u64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
                if secs == 0 {
                    return Err(ConfigError::InvalidTimeout(raw));
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        };

        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_raw.clone()))?;

        let explanation_policy = match lookup(REQUIRE_EXPLANATION_VAR) {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => ExplanationPolicy::Required,
                "0" | "false" | "no" => ExplanationPolicy::Optional,
                _ => return Err(ConfigError::InvalidFlag(REQUIRE_EXPLANATION_VAR, raw)),
            },
            None => ExplanationPolicy::Required,
        };

        Ok(Self {
            backend_url,
            request_timeout,
            bind_addr,
            explanation_policy,
        })
    }
}

/// Validate the backend URL and strip any trailing slash.
fn parse_backend_url(raw: &str) -> Result<String, ConfigError> {
    let url = reqwest::Url::parse(raw)
        .map_err(|e| ConfigError::InvalidBackendUrl(format!("{raw}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(ConfigError::InvalidBackendUrl(format!(
            "{raw}: unsupported scheme '{other}'"
        ))),
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("MEDAI_BACKEND_URL is not set; the prediction service address is required")]
    MissingBackendUrl,
    #[error("Invalid backend URL: {0}")]
    InvalidBackendUrl(String),
    #[error("Invalid request timeout '{0}' (expected a positive number of seconds)")]
    InvalidTimeout(String),
    #[error("Invalid bind address '{0}'")]
    InvalidBindAddr(String),
    #[error("Invalid value for {0}: '{1}'")]
    InvalidFlag(&'static str, String),
}
