//! Configuration validation utilities and rules
//!
//! [`Config::validate`] rejects impossible settings; the checks here only
//! produce advisory warnings for settings that are legal but likely to skew
//! the measurements.

use crate::{error::Result, models::Config};

/// Connection cap above which file descriptor limits become a concern
const HIGH_CONNECTION_COUNT: usize = 1000;

/// Configuration validator with advisory rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration, returning warnings for questionable settings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_performance_settings(config));
        Ok(warnings)
    }

    fn validate_performance_settings(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.timeout_seconds < 3 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!("Timeout of {}s may be too short for reliable measurements", config.timeout_seconds),
            ));
        } else if config.timeout_seconds > 60 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!("Long timeout of {}s will slow down failure detection", config.timeout_seconds),
            ));
        }

        if config.max_connections > HIGH_CONNECTION_COUNT {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "{} concurrent connections may exceed the open file limit",
                    config.max_connections
                ),
            ));
        }

        if config.max_keep_alive > config.max_connections {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Keep-alive limit {} is above max connections {}; at most {} connections are ever open",
                    config.max_keep_alive, config.max_connections, config.max_connections
                ),
            ));
        }

        if config.max_keep_alive == 0 {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Keep-alive disabled: every request opens a new connection".to_string(),
            ));
        }

        if !config.allow_redirects {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "Redirects disabled: 3xx responses are reported as-is".to_string(),
            ));
        }

        warnings
    }

    /// Warn about URL entries that will fail without touching the network
    pub fn validate_url_entries(urls: &[String]) -> Vec<ValidationWarning> {
        urls.iter()
            .filter_map(|entry| match url::Url::parse(entry) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => None,
                Ok(parsed) => Some(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("Unsupported scheme '{}' in '{}'", parsed.scheme(), entry),
                )),
                Err(e) => Some(ValidationWarning::new(
                    ValidationLevel::Warning,
                    format!("Invalid URL '{}': {}", entry, e),
                )),
            })
            .collect()
    }
}

/// Validation warning levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationLevel {
    Info,
    Warning,
}

impl ValidationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self) -> String {
        format!("[{}] {}", self.level.as_str(), self.message)
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_produce_no_warnings() {
        assert!(validate_config(&Config::default()).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_config_is_error() {
        let config = Config { timeout_seconds: 0, ..Config::default() };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_short_and_long_timeouts() {
        let short = validate_config(&Config { timeout_seconds: 1, ..Config::default() }).unwrap();
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].level, ValidationLevel::Warning);

        let long = validate_config(&Config { timeout_seconds: 120, ..Config::default() }).unwrap();
        assert_eq!(long[0].level, ValidationLevel::Info);
    }

    #[test]
    fn test_connection_and_pool_warnings() {
        let config = Config {
            max_connections: 5000,
            max_keep_alive: 0,
            allow_redirects: false,
            ..Config::default()
        };
        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().any(|w| w.message.contains("open file limit")));
        assert!(warnings.iter().any(|w| w.format().starts_with("[INFO] Keep-alive disabled")));
    }

    #[test]
    fn test_keep_alive_above_connections_is_advisory() {
        let config = Config { max_connections: 10, ..Config::default() };
        let warnings = validate_config(&config).unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, ValidationLevel::Info);
        assert!(warnings[0].message.contains("above max connections 10"));
    }

    #[test]
    fn test_url_entry_warnings() {
        let urls = vec![
            "https://example.com".to_string(),
            "ftp://example.com/f".to_string(),
            "not a url".to_string(),
        ];
        let warnings = ConfigValidator::validate_url_entries(&urls);

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].message.contains("Unsupported scheme 'ftp'"));
        assert!(warnings[1].message.starts_with("Invalid URL 'not a url'"));
    }
}
