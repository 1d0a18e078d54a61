//! Upstream connection settings.
//!
//! Values come from the process environment, optionally seeded from a
//! `.env` file in the working directory.

use std::time::Duration;

use thiserror::Error;

pub const BASE_URL_VAR: &str = "GO_REST_API_BASE_URL";
pub const TOKEN_VAR: &str = "GO_REST_API_TOKEN";
pub const TIMEOUT_VAR: &str = "GO_REST_API_TIMEOUT_SECS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Clone, PartialEq, Eq)]
pub struct GoRestConfig {
    pub base_url: String,
    pub token: String,
    /// Overall per-request timeout. `None` defers to the transport default.
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for GoRestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoRestConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GoRestConfig {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Load `.env` if present, then read settings from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // A missing .env file is normal outside development.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`, which returns `None` for unset names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let base_url = required(BASE_URL_VAR)?;
        let token = required(TOKEN_VAR)?;

        let timeout = match lookup(TIMEOUT_VAR) {
            None => None,
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    name: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
        };

        Ok(Self {
            base_url,
            token,
            timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn reads_required_values() {
        let config = GoRestConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://www.test.com/api/v2"),
            (TOKEN_VAR, "1a2b3c"),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "https://www.test.com/api/v2");
        assert_eq!(config.token, "1a2b3c");
        assert!(config.timeout.is_none());
    }

    #[test]
    fn missing_token_is_reported() {
        let err = GoRestConfig::from_lookup(lookup(&[(BASE_URL_VAR, "https://x")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing(TOKEN_VAR));
    }

    #[test]
    fn blank_base_url_counts_as_missing() {
        let err = GoRestConfig::from_lookup(lookup(&[(BASE_URL_VAR, "  "), (TOKEN_VAR, "t")]))
            .unwrap_err();
        assert_eq!(err, ConfigError::Missing(BASE_URL_VAR));
    }

    #[test]
    fn timeout_is_parsed_in_seconds() {
        let config = GoRestConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://x"),
            (TOKEN_VAR, "t"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn bad_timeout_is_invalid() {
        let err = GoRestConfig::from_lookup(lookup(&[
            (BASE_URL_VAR, "https://x"),
            (TOKEN_VAR, "t"),
            (TIMEOUT_VAR, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: TIMEOUT_VAR, .. }));
    }

    #[test]
    fn debug_output_redacts_token() {
        let config = GoRestConfig::new("https://x", "supersecret");
        assert!(!format!("{config:?}").contains("supersecret"));
    }
}
