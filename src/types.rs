//! Type definitions and aliases

use std::time::Duration;
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Latency classification used to color elapsed times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LatencyBand {
    /// Under 100ms
    Fast,
    /// 100ms to 500ms
    Moderate,
    /// 500ms to 2s
    Slow,
    /// 2s and above
    VerySlow,
}

impl LatencyBand {
    /// Classify a response time
    pub fn from_duration(duration: Duration) -> Self {
        let ms = duration.as_secs_f64() * 1000.0;
        if ms < 100.0 {
            Self::Fast
        } else if ms < 500.0 {
            Self::Moderate
        } else if ms < 2000.0 {
            Self::Slow
        } else {
            Self::VerySlow
        }
    }

    pub fn from_secs_f64(secs: f64) -> Self {
        Self::from_duration(Duration::from_secs_f64(secs.max(0.0)))
    }
}

/// HTTP status code class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Informational,
    Success,
    Redirection,
    ClientError,
    ServerError,
    Unknown,
}

impl StatusClass {
    pub fn from_code(code: u16) -> Self {
        match code {
            100..=199 => Self::Informational,
            200..=299 => Self::Success,
            300..=399 => Self::Redirection,
            400..=499 => Self::ClientError,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}
