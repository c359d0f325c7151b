//! Configuration loading, validation, and management for raindeck.
//!
//! Loads configuration from `~/.raindeck/config.toml` with environment
//! variable overrides. A missing file is not an error; a missing Raindrop
//! token is only reported when a search actually runs.

use raindeck_core::agent::AgentProfile;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default Raindrop REST endpoint.
pub const DEFAULT_RAINDROP_BASE_URL: &str = "https://api.raindrop.io/rest/v1";

/// The root configuration structure.
///
/// Maps directly to `~/.raindeck/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// LLM API key handed to the agent runtime
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used by agent profiles that don't name one
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Raindrop bookmark API settings
    #[serde(default)]
    pub raindrop: RaindropConfig,

    /// Extra agent profiles, appended to the built-in roster
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub agents: Vec<AgentProfile>,
}

fn default_model() -> String {
    "gpt-4.1".into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &redact(&self.api_key))
            .field("default_model", &self.default_model)
            .field("raindrop", &self.raindrop)
            .field("agents", &self.agents)
            .finish()
    }
}

/// Raindrop API settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct RaindropConfig {
    /// Bearer token for the Raindrop API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Collection searched when none is given (0 = all)
    #[serde(default)]
    pub default_collection: i64,

    /// Page size used when none is given (1..=50)
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

fn default_base_url() -> String {
    DEFAULT_RAINDROP_BASE_URL.into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_limit() -> u32 {
    50
}

impl RaindropConfig {
    /// The configured token, if it is non-empty.
    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.trim().is_empty())
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }
}

impl Default for RaindropConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            default_collection: 0,
            default_limit: default_limit(),
        }
    }
}

impl std::fmt::Debug for RaindropConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaindropConfig")
            .field("access_token", &redact(&self.access_token))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("default_collection", &self.default_collection)
            .field("default_limit", &self.default_limit)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from the default path (~/.raindeck/config.toml),
    /// then apply environment overrides:
    /// - `RAINDROP_ACCESS_TOKEN`, `RAINDROP_BASE_URL`
    /// - `RAINDECK_API_KEY` (highest priority), then `OPENAI_API_KEY`
    /// - `RAINDECK_MODEL`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    /// Empty values count as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(token) = var("RAINDROP_ACCESS_TOKEN") {
            self.raindrop.access_token = Some(token);
        }
        if let Some(url) = var("RAINDROP_BASE_URL") {
            self.raindrop.base_url = url;
        }
        if let Some(key) = var("RAINDECK_API_KEY") {
            self.api_key = Some(key);
        } else if self.api_key.is_none() {
            self.api_key = var("OPENAI_API_KEY");
        }
        if let Some(model) = var("RAINDECK_MODEL") {
            self.default_model = model;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".raindeck")
    }

    /// Get the configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.raindrop.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "raindrop.timeout_secs must be > 0".into(),
            ));
        }

        if !(1..=50).contains(&self.raindrop.default_limit) {
            return Err(ConfigError::ValidationError(
                "raindrop.default_limit must be between 1 and 50".into(),
            ));
        }

        let url = &self.raindrop.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "raindrop.base_url must start with http:// or https:// (got {url})"
            )));
        }

        if let Some(agent) = self.agents.iter().find(|a| a.name.trim().is_empty()) {
            return Err(ConfigError::ValidationError(format!(
                "agent profile with empty name (instructions: {:?})",
                agent.instructions
            )));
        }

        Ok(())
    }

    /// Check if an LLM API key is available (from config or environment).
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Render the config as TOML with secrets blanked out.
    pub fn redacted_toml(&self) -> Result<String, ConfigError> {
        let mut copy = self.clone();
        if copy.api_key.is_some() {
            copy.api_key = Some("[REDACTED]".into());
        }
        if copy.raindrop.access_token.is_some() {
            copy.raindrop.access_token = Some("[REDACTED]".into());
        }
        toml::to_string_pretty(&copy).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Generate a default config TOML string (for `config init`).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            raindrop: RaindropConfig::default(),
            agents: vec![],
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
