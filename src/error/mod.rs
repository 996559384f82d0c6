//! Error handling for urlstat
//!
//! Only setup failures surface as [`AppError`]. Per-request transport
//! failures are classified into [`crate::models::FetchErrorKind`] and never
//! abort a run.

use thiserror::Error;

/// Custom error types for urlstat
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors (URL file, .env file)
    #[error("I/O error: {0}")]
    Io(String),

    /// Parsing errors (numbers, booleans, JSON)
    #[error("Parsing error: {0}")]
    Parse(String),

    /// HTTP client construction errors
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    /// Statistics calculation errors
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// Generic internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// Create a new HTTP client error
    pub fn http_client<S: Into<String>>(message: S) -> Self {
        Self::HttpClient(message.into())
    }

    /// Create a new statistics error
    pub fn statistics<S: Into<String>>(message: S) -> Self {
        Self::Statistics(message.into())
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Get error category for logging and reporting
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::Io(_) => "IO",
            Self::Parse(_) => "PARSE",
            Self::HttpClient(_) => "HTTP",
            Self::Statistics(_) => "STATS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Get exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Parse(_) => 1,
            Self::HttpClient(_) => 2,
            Self::Io(_) => 5,
            Self::Statistics(_) => 6,
            Self::Internal(_) => 99,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(error: url::ParseError) -> Self {
        Self::Parse(format!("URL parse error: {}", error))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {}", error))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::http_client(error.to_string())
    }
}

impl From<dotenv::Error> for AppError {
    fn from(error: dotenv::Error) -> Self {
        Self::config(format!("Environment file error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::Parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::str::ParseBoolError> for AppError {
    fn from(error: std::str::ParseBoolError) -> Self {
        Self::Parse(format!("Boolean parse error: {}", error))
    }
}

/// Custom Result type for the application
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let error = AppError::config("bad timeout");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(error.to_string(), "Configuration error: bad timeout");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(AppError::config("x").category(), "CONFIG");
        assert_eq!(AppError::io("x").category(), "IO");
        assert_eq!(AppError::Parse("x".into()).category(), "PARSE");
        assert_eq!(AppError::http_client("x").category(), "HTTP");
        assert_eq!(AppError::statistics("x").category(), "STATS");
        assert_eq!(AppError::internal("x").category(), "INTERNAL");
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::config("x").exit_code(), 1);
        assert_eq!(AppError::Parse("x".into()).exit_code(), 1);
        assert_eq!(AppError::http_client("x").exit_code(), 2);
        assert_eq!(AppError::io("x").exit_code(), 5);
        assert_eq!(AppError::statistics("x").exit_code(), 6);
        assert_eq!(AppError::internal("x").exit_code(), 99);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "urls.txt");
        let app_error: AppError = io_error.into();
        assert!(matches!(app_error, AppError::Io(_)));
        assert_eq!(app_error.exit_code(), 5);
    }

    #[test]
    fn test_parse_conversions() {
        let int_error = "abc".parse::<u32>().unwrap_err();
        assert!(matches!(AppError::from(int_error), AppError::Parse(_)));

        let bool_error = "maybe".parse::<bool>().unwrap_err();
        assert!(matches!(AppError::from(bool_error), AppError::Parse(_)));
    }
}
