//! Configuration management
//!
//! Settings are resolved in the following priority order:
//! 1. Environment variables
//! 2. `bookcal.toml` configuration file
//! 3. Defaults
//!
//! The admin secret is required; everything else has a sensible default.

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Main configuration for the gateway.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot token. When absent the gateway runs without the bot.
    pub telegram_token: Option<String>,

    /// Shared admin secret for the mutation endpoints.
    pub api_secret: String,

    /// Base URL the bot uses to reach the HTTP API.
    pub api_url: String,

    /// Path to the SQLite database file.
    pub db_path: String,

    /// Port for the HTTP + WebSocket server.
    pub port: u16,

    /// Allowed CORS origins. Empty or absent means permissive.
    pub allowed_origins: Option<Vec<String>>,
}

fn default_api_port() -> u16 {
    5000
}

fn default_db_path() -> String {
    "data/bookcal.db".to_string()
}

fn default_api_url(port: u16) -> String {
    format!("http://localhost:{port}")
}

impl Config {
    /// Load configuration from the default locations.
    ///
    /// Reads `./bookcal.toml` when present, otherwise environment variables
    /// only. Environment variables always win over file values.
    pub fn load() -> Result<Self> {
        if Path::new("bookcal.toml").exists() {
            return Self::from_toml_file("bookcal.toml");
        }
        Self::from_env()
    }

    /// Load configuration from a TOML file, then apply env overrides.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("failed to read config file: {e}")))?;
        let toml_config: TomlConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse TOML: {e}")))?;

        let mut config = Self::from_toml_config(toml_config);
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("API_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_api_port);

        let config = Self {
            telegram_token: std::env::var("TELEGRAM_BOT_TOKEN").ok(),
            api_secret: std::env::var("API_SECRET").unwrap_or_default(),
            api_url: std::env::var("API_URL").unwrap_or_else(|_| default_api_url(port)),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| default_db_path()),
            port,
            allowed_origins: std::env::var("API_ALLOWED_ORIGINS")
                .ok()
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect()),
        };
        config.validate()?;
        Ok(config)
    }

    fn from_toml_config(toml: TomlConfig) -> Self {
        let telegram = toml.telegram.unwrap_or_default();
        let api = toml.api.unwrap_or_default();
        let storage = toml.storage.unwrap_or_default();

        let port = api.port.unwrap_or_else(default_api_port);
        Self {
            telegram_token: telegram.token,
            api_secret: api.secret.unwrap_or_default(),
            api_url: api.url.unwrap_or_else(|| default_api_url(port)),
            db_path: storage.db_path.unwrap_or_else(default_db_path),
            port,
            allowed_origins: api.allowed_origins,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(token) = std::env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram_token = Some(token);
        }
        if let Ok(secret) = std::env::var("API_SECRET") {
            self.api_secret = secret;
        }
        if let Ok(url) = std::env::var("API_URL") {
            self.api_url = url;
        }
        if let Ok(path) = std::env::var("DB_PATH") {
            self.db_path = path;
        }
        if let Ok(port) = std::env::var("API_PORT") {
            if let Ok(p) = port.parse() {
                self.port = p;
            }
        }
        if let Ok(origins) = std::env::var("API_ALLOWED_ORIGINS") {
            self.allowed_origins =
                Some(origins.split(',').map(|s| s.trim().to_string()).collect());
        }
    }

    fn validate(&self) -> Result<()> {
        if self.api_secret.is_empty() {
            return Err(Error::Config(
                "API_SECRET is not set; the admin endpoints require a shared secret".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// TOML file structures
// ============================================================================

#[derive(Debug, Deserialize)]
struct TomlConfig {
    telegram: Option<TomlTelegramConfig>,
    api: Option<TomlApiConfig>,
    storage: Option<TomlStorageConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlTelegramConfig {
    token: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlApiConfig {
    #[serde(default)]
    secret: Option<String>,
    #[serde(default)]
    port: Option<u16>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlStorageConfig {
    #[serde(default)]
    db_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_config_parsing() {
        let toml_content = r#"
[telegram]
token = "12345:token"

[api]
secret = "hunter2"
port = 8080
url = "http://api.internal:8080"
allowed_origins = ["https://example.com"]

[storage]
db_path = "/var/lib/bookcal/dates.db"
"#;
        let toml_config: TomlConfig = toml::from_str(toml_content).unwrap();
        let config = Config::from_toml_config(toml_config);

        assert_eq!(config.telegram_token, Some("12345:token".to_string()));
        assert_eq!(config.api_secret, "hunter2");
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_url, "http://api.internal:8080");
        assert_eq!(
            config.allowed_origins,
            Some(vec!["https://example.com".to_string()])
        );
        assert_eq!(config.db_path, "/var/lib/bookcal/dates.db");
    }

    #[test]
    fn toml_config_defaults() {
        let toml_config: TomlConfig = toml::from_str("[api]\nsecret = \"s\"").unwrap();
        let config = Config::from_toml_config(toml_config);

        assert!(config.telegram_token.is_none());
        assert_eq!(config.port, 5000);
        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.db_path, "data/bookcal.db");
        assert!(config.allowed_origins.is_none());
    }

    #[test]
    fn missing_secret_is_rejected() {
        let toml_config: TomlConfig = toml::from_str("").unwrap();
        let config = Config::from_toml_config(toml_config);
        assert!(config.validate().is_err());
    }
}
