//! Configuration module for the admin data layer.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::normalize_base_url;
use crate::store::FallbackPolicy;

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api";
const DEFAULT_DEBOUNCE_MS: u64 = 700;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend origin, already normalized
    pub api_base_url: String,
    /// Durable storage file holding the bearer token
    pub token_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Quiet period before a typed search is committed
    pub search_debounce: Duration,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
    /// When reads fall back to the mock catalog
    pub fallback_policy: FallbackPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            token_path: PathBuf::from("./data/auth.json"),
            log_level: "info".to_string(),
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            fallback_policy: FallbackPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("SALON_API_BASE_URL")
            .map(|raw| normalize_base_url(&raw))
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_base_url);

        let token_path = lookup("SALON_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.token_path);

        let log_level = lookup("SALON_LOG_LEVEL").unwrap_or(defaults.log_level);

        let search_debounce = match lookup("SALON_SEARCH_DEBOUNCE_MS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!("Invalid SALON_SEARCH_DEBOUNCE_MS {:?}, using default", raw);
                    defaults.search_debounce
                }
            },
            None => defaults.search_debounce,
        };

        let request_timeout = match lookup("SALON_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!("Invalid SALON_REQUEST_TIMEOUT_SECS {:?}, using default", raw);
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        let fallback_policy = match lookup("SALON_MOCK_FALLBACK") {
            Some(raw) => raw.parse::<FallbackPolicy>().unwrap_or_else(|_| {
                tracing::warn!("Invalid SALON_MOCK_FALLBACK {:?}, using default", raw);
                defaults.fallback_policy
            }),
            None => defaults.fallback_policy,
        };

        Self {
            api_base_url,
            token_path,
            log_level,
            search_debounce,
            request_timeout,
            fallback_policy,
        }
    }
}
