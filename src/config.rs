//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default base URL of the wellness backend API.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Service configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend REST API (no trailing slash).
    pub api_base_url: String,
    /// Bearer token sent with the onboarding request.
    pub api_token: Option<SecretString>,
    /// Timeout for calls to the backend.
    pub request_timeout: Duration,
    /// Port the host API listens on.
    pub listen_port: u16,
    /// Registered name used to seed the first step.
    pub seed_name: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_token: None,
            request_timeout: Duration::from_secs(15),
            listen_port: 8080,
            seed_name: None,
        }
    }
}

impl Config {
    /// Build configuration from `WELLNESS_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("WELLNESS_API_BASE_URL")
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.api_base_url);
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "WELLNESS_API_BASE_URL".into(),
                message: format!("expected an http(s) URL, got {api_base_url}"),
            });
        }

        let api_token = lookup("WELLNESS_API_TOKEN")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(SecretString::from);

        let request_timeout = match lookup("WELLNESS_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "WELLNESS_API_TIMEOUT_SECS".into(),
                    message: format!("not a number of seconds: {raw}"),
                })?;
                Duration::from_secs(secs.max(1))
            }
            None => defaults.request_timeout,
        };

        let listen_port = match lookup("WELLNESS_LISTEN_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "WELLNESS_LISTEN_PORT".into(),
                message: format!("not a port number: {raw}"),
            })?,
            None => defaults.listen_port,
        };

        let seed_name = lookup("WELLNESS_SEED_NAME")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Ok(Self {
            api_base_url,
            api_token,
            request_timeout,
            listen_port,
            seed_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.api_token.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        assert_eq!(config.listen_port, 8080);
        assert!(config.seed_name.is_none());
    }

    #[test]
    fn reads_all_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("WELLNESS_API_BASE_URL", "https://api.example.com/api/"),
            ("WELLNESS_API_TOKEN", "tok-123"),
            ("WELLNESS_API_TIMEOUT_SECS", "30"),
            ("WELLNESS_LISTEN_PORT", "9090"),
            ("WELLNESS_SEED_NAME", "Riley"),
        ]))
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com/api");
        assert_eq!(config.api_token.unwrap().expose_secret(), "tok-123");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.listen_port, 9090);
        assert_eq!(config.seed_name.as_deref(), Some("Riley"));
    }

    #[test]
    fn blank_token_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[("WELLNESS_API_TOKEN", "  ")])).unwrap();
        assert!(config.api_token.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("WELLNESS_LISTEN_PORT", "http")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("WELLNESS_API_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup_from(&[("WELLNESS_API_BASE_URL", "ftp://x")])),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
