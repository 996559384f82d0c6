//! Configuration data model and validation

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Environment variable names understood by [`Config::merge_from_env`]
pub mod env_keys {
    pub const TIMEOUT: &str = "URLSTAT_TIMEOUT";
    pub const MAX_CONNECTIONS: &str = "URLSTAT_MAX_CONNECTIONS";
    pub const MAX_KEEP_ALIVE: &str = "URLSTAT_MAX_KEEP_ALIVE";
    pub const ALLOW_REDIRECTS: &str = "URLSTAT_ALLOW_REDIRECTS";
    pub const ENABLE_COLOR: &str = "URLSTAT_ENABLE_COLOR";
    pub const NO_COLOR: &str = "NO_COLOR";

    pub const ALL: &[&str] = &[TIMEOUT, MAX_CONNECTIONS, MAX_KEEP_ALIVE, ALLOW_REDIRECTS, ENABLE_COLOR];
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the URL list file
    #[serde(default)]
    pub urls_path: PathBuf,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_seconds: u64,

    /// Cap on concurrently open connections
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,

    /// Cap on idle keep-alive connections
    #[serde(default = "default_max_keep_alive")]
    pub max_keep_alive: usize,

    /// Follow HTTP redirects
    #[serde(default = "default_allow_redirects")]
    pub allow_redirects: bool,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Emit a JSON document instead of text lines
    #[serde(default)]
    pub json_output: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls_path: PathBuf::new(),
            timeout_seconds: default_timeout_secs(),
            max_connections: default_max_connections(),
            max_keep_alive: default_max_keep_alive(),
            allow_redirects: default_allow_redirects(),
            enable_color: default_enable_color(),
            json_output: false,
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(AppError::config("Timeout must be greater than 0"));
        }

        if self.max_connections == 0 {
            return Err(AppError::config("Max connections must be greater than 0"));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge values supplied by `lookup` (keyed by environment variable name)
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(timeout) = lookup(env_keys::TIMEOUT) {
            self.timeout_seconds = timeout.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", env_keys::TIMEOUT, timeout, e)))?;
        }

        if let Some(max_connections) = lookup(env_keys::MAX_CONNECTIONS) {
            self.max_connections = max_connections.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", env_keys::MAX_CONNECTIONS, max_connections, e)))?;
        }

        if let Some(max_keep_alive) = lookup(env_keys::MAX_KEEP_ALIVE) {
            self.max_keep_alive = max_keep_alive.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", env_keys::MAX_KEEP_ALIVE, max_keep_alive, e)))?;
        }

        if let Some(allow_redirects) = lookup(env_keys::ALLOW_REDIRECTS) {
            self.allow_redirects = parse_flag(&allow_redirects)
                .ok_or_else(|| AppError::config(format!("Invalid {} value '{}'", env_keys::ALLOW_REDIRECTS, allow_redirects)))?;
        }

        if let Some(enable_color) = lookup(env_keys::ENABLE_COLOR) {
            self.enable_color = parse_flag(&enable_color)
                .ok_or_else(|| AppError::config(format!("Invalid {} value '{}'", env_keys::ENABLE_COLOR, enable_color)))?;
        }

        // https://no-color.org: presence disables color regardless of value
        if lookup(env_keys::NO_COLOR).is_some_and(|v| !v.is_empty()) {
            self.enable_color = false;
        }

        Ok(())
    }
}

/// Parse a boolean flag the way operators tend to write them
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" | "y" => Some(true),
        "false" | "no" | "off" | "0" | "n" => Some(false),
        _ => None,
    }
}

// Default value functions for serde
fn default_timeout_secs() -> u64 {
    crate::defaults::DEFAULT_TIMEOUT.as_secs()
}

fn default_max_connections() -> usize {
    crate::defaults::DEFAULT_MAX_CONNECTIONS
}

fn default_max_keep_alive() -> usize {
    crate::defaults::DEFAULT_MAX_KEEP_ALIVE
}

fn default_allow_redirects() -> bool {
    crate::defaults::DEFAULT_ALLOW_REDIRECTS
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}
