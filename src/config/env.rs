//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use crate::models::config::{env_keys, parse_flag};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load .env from the working directory if it exists.
    ///
    /// Variables already set in the process environment are not overridden.
    pub fn load_env_file(debug: bool) -> Result<()> {
        Self::load_env_file_from(Path::new(".env"), debug)
    }

    pub fn load_env_file_from(path: &Path, debug: bool) -> Result<()> {
        if path.exists() {
            dotenv::from_path(path)
                .map_err(|e| AppError::config(format!("Failed to load {}: {}", path.display(), e)))?;

            if debug {
                eprintln!("Loaded configuration from {}", path.display());
            }
        } else if debug {
            eprintln!("No .env file found, using defaults and CLI arguments");
        }

        Ok(())
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        format!(
            r#"# urlstat configuration
#
# Values set here are used as defaults and can be overridden by
# command-line arguments. Variables already present in the environment
# take precedence over this file.

# Request timeout in seconds (greater than 0)
# {timeout}=30

# Maximum number of concurrent connections
# {max_connections}=300

# Maximum number of idle keep-alive connections
# {max_keep_alive}=30

# Follow HTTP redirects (true/false)
# {allow_redirects}=true

# Enable colored output (true/false); setting NO_COLOR disables it
# {enable_color}=true
"#,
            timeout = env_keys::TIMEOUT,
            max_connections = env_keys::MAX_CONNECTIONS,
            max_keep_alive = env_keys::MAX_KEEP_ALIVE,
            allow_redirects = env_keys::ALLOW_REDIRECTS,
            enable_color = env_keys::ENABLE_COLOR,
        )
    }

    /// Save example .env file to disk
    pub fn save_example_env_file(path: &Path) -> Result<()> {
        std::fs::write(path, Self::create_example_env_content())
            .map_err(|e| AppError::config(format!("Failed to write example .env file: {}", e)))
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        match key {
            env_keys::TIMEOUT => {
                let timeout: u64 = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
                if timeout == 0 {
                    return Err(AppError::config(format!("{} must be greater than 0", key)));
                }
            }
            env_keys::MAX_CONNECTIONS => {
                let connections: usize = value.trim().parse()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
                if connections == 0 {
                    return Err(AppError::config(format!("{} must be greater than 0", key)));
                }
            }
            env_keys::MAX_KEEP_ALIVE => {
                value.trim().parse::<usize>()
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
            }
            env_keys::ALLOW_REDIRECTS | env_keys::ENABLE_COLOR => {
                parse_flag(value)
                    .ok_or_else(|| AppError::config(format!("Invalid {} value '{}'", key, value)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    /// Get list of all supported environment variables with descriptions
    pub fn supported_variables() -> Vec<(&'static str, &'static str)> {
        vec![
            (env_keys::TIMEOUT, "Request timeout in seconds"),
            (env_keys::MAX_CONNECTIONS, "Maximum number of concurrent connections"),
            (env_keys::MAX_KEEP_ALIVE, "Maximum number of idle keep-alive connections"),
            (env_keys::ALLOW_REDIRECTS, "Follow HTTP redirects (true/false)"),
            (env_keys::ENABLE_COLOR, "Enable colored output (true/false)"),
            (env_keys::NO_COLOR, "Disable colored output when set to any value"),
        ]
    }
}
