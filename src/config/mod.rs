//! # Configuration Module
//!
//! This module handles loading and validating configuration from
//! environment variables. All settings are centralized here.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let config = AppConfig::from_env()?;
//! println!("API URL: {}", config.ads_api_url);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Description | Example |
//! |----------|-------------|---------|
//! | `ADS_API_URL` | Base URL of the ADS API | `https://dev.adsabs.harvard.edu/v1/` |
//! | `API_TIMEOUT` | Upstream request timeout (seconds) | `30` |
//! | `SERVER_HOST` | HTTP server host | `127.0.0.1` |
//! | `SERVER_PORT` | HTTP server port | `8080` |
//! | `SESSION_SECRET` | Cookie signing key material (>= 64 bytes) | random string |
//! | `SEARCH_ROWS` | Result rows requested per query | `25` |

use std::env;
use thiserror::Error;

/// Errors that can occur when loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// Failed to parse a value
    #[error("Failed to parse {0}: {1}")]
    ParseError(String, String),
}

/// Application configuration loaded from environment variables.
///
/// Values are loaded at startup; every setting has a default so the
/// service runs against the ADS development instance out of the box.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // ==========================================
    // UPSTREAM API SETTINGS
    // ==========================================

    /// Base URL of the ADS API.
    ///
    /// Service endpoints (`accounts/bootstrap`, `search/query`,
    /// `export/bibtex`) are resolved relative to this URL.
    ///
    /// Common values:
    /// - Development: `https://dev.adsabs.harvard.edu/v1/`
    /// - Production: `https://prod.adsabs.harvard.edu/v1/`
    pub ads_api_url: String,

    /// Timeout for upstream API requests, in seconds.
    pub api_timeout: u64,

    /// Number of result rows requested per search query.
    pub search_rows: u32,

    // ==========================================
    // SERVER SETTINGS
    // ==========================================

    /// HTTP server host address.
    ///
    /// Use `127.0.0.1` for localhost only, `0.0.0.0` to accept
    /// connections from any interface.
    pub server_host: String,

    /// HTTP server port number.
    ///
    /// Default: 8080
    pub server_port: u16,

    // ==========================================
    // SESSION SETTINGS
    // ==========================================

    /// Key material for signing the visitor session cookie.
    ///
    /// Must be at least 64 bytes when set. When unset a random key is
    /// generated at startup, which invalidates sessions on restart.
    pub session_secret: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Use `dotenvy::dotenv()` before calling this to load from a
    /// `.env` file.
    ///
    /// ## Returns
    ///
    /// - `Ok(AppConfig)` - Configuration loaded successfully
    /// - `Err(ConfigError)` - A variable has an invalid value
    pub fn from_env() -> Result<Self, ConfigError> {
        let session_secret = env::var("SESSION_SECRET").ok();
        if let Some(secret) = &session_secret {
            if secret.len() < 64 {
                return Err(ConfigError::InvalidValue(
                    "SESSION_SECRET".to_string(),
                    format!("need at least 64 bytes, got {}", secret.len()),
                ));
            }
        }

        Ok(Self {
            // Upstream API
            ads_api_url: get_env_or_default(
                "ADS_API_URL",
                "https://dev.adsabs.harvard.edu/v1/",
            ),
            api_timeout: get_env_or_default("API_TIMEOUT", "30")
                .parse()
                .map_err(|e| ConfigError::ParseError(
                    "API_TIMEOUT".to_string(),
                    format!("{}", e),
                ))?,
            search_rows: get_env_or_default("SEARCH_ROWS", "25")
                .parse()
                .map_err(|e| ConfigError::ParseError(
                    "SEARCH_ROWS".to_string(),
                    format!("{}", e),
                ))?,

            // Server
            server_host: get_env_or_default("SERVER_HOST", "127.0.0.1"),
            server_port: get_env_or_default("SERVER_PORT", "8080")
                .parse()
                .map_err(|e| ConfigError::ParseError(
                    "SERVER_PORT".to_string(),
                    format!("{}", e),
                ))?,

            // Session
            session_secret,
        })
    }
}

/// Get an environment variable with a default value.
///
/// Returns the default if the variable is not set.
fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_or_default() {
        // Should return default when not set
        let value = get_env_or_default("NONEXISTENT_VAR_12345", "default_value");
        assert_eq!(value, "default_value");
    }
}
