//! Application configuration.
//!
//! Defaults first, then environment overrides:
//!
//! | variable | field | default |
//! |---|---|---|
//! | `FACTS_LOG_PROFILE` | `log_profile` | `development` |
//! | `FACTS_UPDATE_MAX_ATTEMPTS` | `update_max_attempts` | 10 |
//! | `FACTS_UPDATE_BASE_DELAY_MS` | `update_base_delay` | 1 |
//! | `FACTS_REQUEST_TIMEOUT_MS` | `request_timeout` | 5000 |
//!
//! Empty values are treated as unset. Values that fail to parse are errors.

use std::env;
use std::time::Duration;

use crate::impls::RetryPolicy;
use crate::logging::Profile;

pub const ENV_LOG_PROFILE: &str = "FACTS_LOG_PROFILE";
pub const ENV_UPDATE_MAX_ATTEMPTS: &str = "FACTS_UPDATE_MAX_ATTEMPTS";
pub const ENV_UPDATE_BASE_DELAY_MS: &str = "FACTS_UPDATE_BASE_DELAY_MS";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "FACTS_REQUEST_TIMEOUT_MS";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}': {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_profile: Profile,
    /// Transaction attempts for a single update before giving up.
    pub update_max_attempts: u32,
    /// Base backoff between conflicting update attempts.
    pub update_base_delay: Duration,
    /// Deadline applied to each request context.
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_profile: Profile::Development,
            update_max_attempts: 10,
            update_base_delay: Duration::from_millis(1),
            request_timeout: Duration::from_millis(5000),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|name| env::var(name).ok())
    }

    /// Apply overrides from `lookup` (an environment-like source).
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(value) = get(ENV_LOG_PROFILE) {
            self.log_profile = value
                .parse()
                .map_err(|reason| invalid(ENV_LOG_PROFILE, &value, reason))?;
        }

        if let Some(value) = get(ENV_UPDATE_MAX_ATTEMPTS) {
            let attempts: u32 = value
                .trim()
                .parse()
                .map_err(|e| invalid(ENV_UPDATE_MAX_ATTEMPTS, &value, format!("{e}")))?;
            if attempts == 0 {
                return Err(invalid(ENV_UPDATE_MAX_ATTEMPTS, &value, "must be at least 1".into()));
            }
            self.update_max_attempts = attempts;
        }

        if let Some(value) = get(ENV_UPDATE_BASE_DELAY_MS) {
            self.update_base_delay = parse_millis(ENV_UPDATE_BASE_DELAY_MS, &value)?;
        }

        if let Some(value) = get(ENV_REQUEST_TIMEOUT_MS) {
            self.request_timeout = parse_millis(ENV_REQUEST_TIMEOUT_MS, &value)?;
        }

        Ok(self)
    }

    /// Retry policy for the document store's update transactions.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.update_max_attempts, self.update_base_delay)
    }
}

fn parse_millis(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| invalid(var, value, format!("{e}")))
}

fn invalid(var: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason,
    }
}
