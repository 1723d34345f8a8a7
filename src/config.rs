//! Application configuration and environment variable parsing.
//!
//! This module handles loading configuration settings from the environment (e.g., .env file).
//! It defines the `AppConfig` struct which holds the GitHub identity the card is drawn for,
//! the text shown in the card header, and the cache lifetime advertised to edge caches.

use crate::error::CardError;
use serde::Deserialize;

const DEFAULT_SUBTITLE: &str = "FULL STACK DEVELOPER";
const DEFAULT_CACHE_MAX_AGE_SECONDS: u64 = 3600;
const DEFAULT_PORT: u16 = 3000;

/// Application configuration loaded from environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    /// Login of the GitHub user whose card is rendered.
    ///
    /// Optional at startup: a missing value is reported on each request instead.
    #[serde(default)]
    pub github_username: Option<String>,

    /// Fallback for `github_username`, read from `NEXT_PUBLIC_GITHUB_USERNAME`.
    #[serde(default)]
    pub next_public_github_username: Option<String>,

    /// GitHub Personal Access Token used for the GraphQL API.
    #[serde(default)]
    pub github_token: Option<String>,

    /// Name printed in the card header. Falls back to the username.
    #[serde(default)]
    pub display_name: Option<String>,

    /// Fixed line printed under the display name.
    #[serde(default = "default_subtitle")]
    pub subtitle: String,

    /// `max-age` / `s-maxage` advertised in the `Cache-Control` header.
    #[serde(default = "default_cache_max_age_seconds")]
    pub cache_max_age_seconds: u64,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    pub port: u16,
}

/// The two values required before any request to GitHub can be made.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub token: &'a str,
}

fn default_subtitle() -> String {
    DEFAULT_SUBTITLE.to_string()
}

fn default_cache_max_age_seconds() -> u64 {
    DEFAULT_CACHE_MAX_AGE_SECONDS
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_username: None,
            next_public_github_username: None,
            github_token: None,
            display_name: None,
            subtitle: default_subtitle(),
            cache_max_age_seconds: default_cache_max_age_seconds(),
            port: default_port(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// `GITHUB_USERNAME`, else `NEXT_PUBLIC_GITHUB_USERNAME`.
    pub fn username(&self) -> Option<&str> {
        non_blank(&self.github_username).or_else(|| non_blank(&self.next_public_github_username))
    }

    /// Returns the username and token, or a configuration error if either is unset or blank.
    pub fn credentials(&self) -> Result<Credentials<'_>, CardError> {
        match (self.username(), non_blank(&self.github_token)) {
            (Some(username), Some(token)) => Ok(Credentials { username, token }),
            (None, _) => Err(CardError::Config(
                "Missing environment variable GITHUB_USERNAME (or NEXT_PUBLIC_GITHUB_USERNAME)"
                    .to_string(),
            )),
            (_, None) => Err(CardError::Config(
                "Missing environment variable GITHUB_TOKEN".to_string(),
            )),
        }
    }

    /// Header name for the card, upper-cased.
    pub fn header_name(&self, username: &str) -> String {
        non_blank(&self.display_name)
            .unwrap_or(username)
            .to_uppercase()
    }

    pub fn cache_control(&self) -> String {
        format!(
            "public, max-age={0}, s-maxage={0}",
            self.cache_max_age_seconds
        )
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const VARS: [&str; 7] = [
        "GITHUB_USERNAME",
        "NEXT_PUBLIC_GITHUB_USERNAME",
        "GITHUB_TOKEN",
        "DISPLAY_NAME",
        "SUBTITLE",
        "CACHE_MAX_AGE_SECONDS",
        "PORT",
    ];

    fn clear_vars() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_config_from_env() {
        clear_vars();
        env::set_var("GITHUB_USERNAME", "octocat");
        env::set_var("GITHUB_TOKEN", "ghp_secret");
        env::set_var("DISPLAY_NAME", "Mona Lisa");
        env::set_var("SUBTITLE", "RUSTACEAN");
        env::set_var("CACHE_MAX_AGE_SECONDS", "600");
        env::set_var("PORT", "8080");

        let config = AppConfig::from_env().expect("Failed to load config");

        assert_eq!(config.github_username.as_deref(), Some("octocat"));
        assert_eq!(config.github_token.as_deref(), Some("ghp_secret"));
        assert_eq!(config.subtitle, "RUSTACEAN");
        assert_eq!(config.cache_max_age_seconds, 600);
        assert_eq!(config.port, 8080);
        assert_eq!(config.header_name("octocat"), "MONA LISA");

        clear_vars();
    }

    #[test]
    #[serial]
    fn test_config_defaults_when_unset() {
        clear_vars();

        let config = AppConfig::from_env().expect("Failed to load config");

        assert!(config.github_username.is_none());
        assert!(config.github_token.is_none());
        assert_eq!(config.subtitle, DEFAULT_SUBTITLE);
        assert_eq!(config.cache_max_age_seconds, 3600);
        assert_eq!(config.port, 3000);
    }

    #[test]
    #[serial]
    fn test_config_falls_back_to_public_username() {
        clear_vars();
        env::set_var("NEXT_PUBLIC_GITHUB_USERNAME", "hubot");

        let config = AppConfig::from_env().expect("Failed to load config");
        assert!(config.github_username.is_none());
        assert_eq!(config.username(), Some("hubot"));

        clear_vars();
    }

    #[test]
    #[serial]
    fn test_config_prefers_github_username_when_both_set() {
        clear_vars();
        env::set_var("GITHUB_USERNAME", "octocat");
        env::set_var("NEXT_PUBLIC_GITHUB_USERNAME", "hubot");
        env::set_var("GITHUB_TOKEN", "ghp_secret");

        let config = AppConfig::from_env().expect("both names set must still load");
        assert_eq!(config.username(), Some("octocat"));
        assert_eq!(config.credentials().unwrap().username, "octocat");

        clear_vars();
    }

    #[test]
    #[serial]
    fn test_config_invalid_port() {
        clear_vars();
        env::set_var("PORT", "not-a-port");
        assert!(AppConfig::from_env().is_err());
        clear_vars();
    }

    #[test]
    fn test_credentials_require_both_values() {
        let mut config = AppConfig {
            github_username: Some("octocat".to_string()),
            ..AppConfig::default()
        };
        assert!(matches!(config.credentials(), Err(CardError::Config(_))));

        config.github_token = Some("   ".to_string());
        assert!(matches!(config.credentials(), Err(CardError::Config(_))));

        config.github_token = Some("token".to_string());
        let creds = config.credentials().expect("credentials present");
        assert_eq!(creds.username, "octocat");
        assert_eq!(creds.token, "token");
    }

    #[test]
    fn test_missing_username_message_names_both_variables() {
        let config = AppConfig {
            github_token: Some("token".to_string()),
            ..AppConfig::default()
        };
        match config.credentials() {
            Err(CardError::Config(message)) => {
                assert!(message.contains("GITHUB_USERNAME"));
                assert!(message.contains("NEXT_PUBLIC_GITHUB_USERNAME"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_header_name_falls_back_to_username() {
        let config = AppConfig::default();
        assert_eq!(config.header_name("octocat"), "OCTOCAT");
    }

    #[test]
    fn test_cache_control_header() {
        let config = AppConfig::default();
        assert_eq!(config.cache_control(), "public, max-age=3600, s-maxage=3600");
    }
}
