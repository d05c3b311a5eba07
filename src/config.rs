//! Configuration management for the Phonebook MCP Server.
//!
//! Configuration comes from environment variables. A `.env` file is loaded
//! first if present; `dotenvy` does not print to stdout, which MCP owns.

use crate::error::{ConfigError, ConfigResult};
use crate::locale::Locale;
use std::env;

/// Configuration for the Phonebook MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root URL of the phonebook backend; `/api/persons` is appended
    pub api_base_url: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Seconds a notification stays visible (default: 4)
    pub notification_timeout_secs: u64,

    /// Language for user-facing messages (default: English)
    pub locale: Locale,

    /// Tracing filter used when `RUST_LOG` is unset (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `PHONEBOOK_API_BASE_URL`: Root URL of the phonebook backend
    ///
    /// Optional environment variables:
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `NOTIFICATION_TIMEOUT_SECS`: Notification lifetime (default: 4)
    /// - `PHONEBOOK_LOCALE`: `en` or `fi` (default: `en`)
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let api_base_url = env::var("PHONEBOOK_API_BASE_URL")
            .map_err(|_| ConfigError::MissingVar("PHONEBOOK_API_BASE_URL".to_string()))?;

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "PHONEBOOK_API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let notification_timeout_secs = Self::parse_env_u64("NOTIFICATION_TIMEOUT_SECS", 4)?;

        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let locale = match env::var("PHONEBOOK_LOCALE") {
            Ok(val) => val.parse::<Locale>().map_err(|reason| ConfigError::InvalidValue {
                var: "PHONEBOOK_LOCALE".to_string(),
                reason,
            })?,
            Err(_) => Locale::default(),
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            api_base_url,
            request_timeout,
            notification_timeout_secs,
            locale,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::new(),
            request_timeout: 10,
            notification_timeout_secs: 4,
            locale: Locale::English,
            log_level: "error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Sets env vars for one test and removes them again on drop
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.notification_timeout_secs, 4);
        assert_eq!(config.locale, Locale::English);
    }

    #[test]
    #[serial]
    fn test_config_from_env_invalid_url() {
        let mut guard = EnvGuard::new();
        guard.set("PHONEBOOK_API_BASE_URL", "localhost:3001");

        let result = Config::from_env();
        match result {
            Err(ConfigError::InvalidValue { var, .. }) => {
                assert_eq!(var, "PHONEBOOK_API_BASE_URL");
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("PHONEBOOK_API_BASE_URL", "http://localhost:3001");
        guard.set("REQUEST_TIMEOUT", "5");
        guard.set("NOTIFICATION_TIMEOUT_SECS", "2");
        guard.set("PHONEBOOK_LOCALE", "fi");

        let config = Config::from_env().expect("config should load");
        assert_eq!(config.api_base_url, "http://localhost:3001");
        assert_eq!(config.request_timeout, 5);
        assert_eq!(config.notification_timeout_secs, 2);
        assert_eq!(config.locale, Locale::Finnish);
    }

    #[test]
    #[serial]
    fn test_config_log_level() {
        let mut guard = EnvGuard::new();
        guard.set("PHONEBOOK_API_BASE_URL", "http://localhost:3001");

        assert_eq!(Config::from_env().unwrap().log_level, "error");

        guard.set("LOG_LEVEL", "phonebook_mcp_server=debug");
        assert_eq!(
            Config::from_env().unwrap().log_level,
            "phonebook_mcp_server=debug"
        );
    }

    #[test]
    #[serial]
    fn test_config_invalid_locale() {
        let mut guard = EnvGuard::new();
        guard.set("PHONEBOOK_API_BASE_URL", "https://phonebook.example.com");
        guard.set("PHONEBOOK_LOCALE", "klingon");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "PHONEBOOK_LOCALE"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_timeout_rejected() {
        let mut guard = EnvGuard::new();
        guard.set("PHONEBOOK_API_BASE_URL", "https://phonebook.example.com");
        guard.set("REQUEST_TIMEOUT", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REQUEST_TIMEOUT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        assert_eq!(Config::parse_env_u64("TEST_U64", 10).unwrap(), 42);
        assert_eq!(Config::parse_env_u64("NONEXISTENT", 10).unwrap(), 10);
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        assert!(Config::parse_env_u64("TEST_U64_INVALID", 10).is_err());
    }
}
