//! Configuration management for Jobscout.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Main application configuration.
///
/// This is loaded from `~/.config/jobscout/config.toml` (or platform
/// equivalent). If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Token verification settings
    pub auth: AuthConfig,
    /// Database settings
    pub database: DatabaseConfig,
    /// Portal scraping settings
    pub scraping: ScrapingConfig,
    /// Search audit settings
    pub audit: AuditConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            tracing::debug!("Loading config from {}", config_path.display());
            let contents = fs::read_to_string(&config_path)?;
            let config = toml::from_str(&contents)?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `JOBSCOUT_BIND_ADDR`: Override the server bind address
    /// - `JOBSCOUT_TOKEN_SECRET`: Override the token signing secret
    /// - `JOBSCOUT_DB_PATH`: Override the database path
    /// - `JOBSCOUT_AUDIT_ON_FAILURE`: Override the audit failure policy
    ///   (`log` or `fail`)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;

        // Override from environment
        if let Ok(val) = std::env::var("JOBSCOUT_BIND_ADDR") {
            if !val.is_empty() {
                config.server.bind_addr = val.clone();
                tracing::debug!("Override server.bind_addr from env: {}", val);
            }
        }

        if let Ok(val) = std::env::var("JOBSCOUT_TOKEN_SECRET") {
            if !val.is_empty() {
                config.auth.token_secret = val;
                tracing::debug!("Override auth.token_secret from env");
            }
        }

        if let Ok(val) = std::env::var("JOBSCOUT_DB_PATH") {
            if !val.is_empty() {
                config.database.path = val.clone();
                tracing::debug!("Override database.path from env: {}", val);
            }
        }

        if let Ok(val) = std::env::var("JOBSCOUT_AUDIT_ON_FAILURE") {
            match val.to_ascii_lowercase().as_str() {
                "log" => config.audit.on_failure = AuditFailurePolicy::Log,
                "fail" => config.audit.on_failure = AuditFailurePolicy::Fail,
                other => {
                    return Err(ConfigError::InvalidValue {
                        field: "audit.on_failure".to_string(),
                        reason: format!("expected 'log' or 'fail', got '{other}'"),
                    })
                }
            }
            tracing::debug!("Override audit.on_failure from env: {}", val);
        }

        Ok(config)
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/jobscout/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("dev", "jobscout", "jobscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path.
    ///
    /// Uses XDG base directories: `~/.local/share/jobscout`
    pub fn data_dir() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("dev", "jobscout", "jobscout").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.data_dir().to_path_buf())
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the server listens on
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Token verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret used to verify bearer tokens.
    ///
    /// Empty by default; must be supplied via config file or
    /// `JOBSCOUT_TOKEN_SECRET` before the server will start.
    pub token_secret: String,
    /// Clock skew tolerance in seconds when checking expiry
    pub leeway_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: String::new(),
            leeway_secs: 0,
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file (or `:memory:`)
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "jobscout.db".to_string(),
        }
    }
}

/// Portal scraping settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapingConfig {
    /// Timeout in seconds for a single portal request
    pub request_timeout_secs: u64,
    /// User-Agent header sent to portals
    pub user_agent: String,
    /// Base URL of the careers portal search page
    pub careers_online_url: String,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            user_agent: format!("jobscout/{}", env!("CARGO_PKG_VERSION")),
            careers_online_url: "https://careersonline.example.edu/jobs/search".to_string(),
        }
    }
}

/// Policy applied when a search audit write fails after a successful scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditFailurePolicy {
    /// Log the failure and return the scrape result anyway
    Log,
    /// Fail the whole request
    Fail,
}

/// Search audit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// What to do when the audit insert fails
    pub on_failure: AuditFailurePolicy,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            on_failure: AuditFailurePolicy::Log,
        }
    }
}
