//! Fetch result data model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Classification of a request-level transport failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// The request did not complete within the configured timeout
    Timeout,
    /// The connection could not be established (refused, DNS, TLS)
    Connect,
    /// Redirect limit exceeded or redirect loop
    Redirect,
    /// The request could not be sent
    Request,
    /// The response body could not be read
    Body,
    /// The response could not be decoded
    Decode,
    /// The URL could not be parsed
    InvalidUrl,
    /// Any other transport failure
    Transport,
}

impl FetchErrorKind {
    /// Name printed next to the URL when a request fails
    pub fn name(&self) -> &'static str {
        match self {
            Self::Timeout => "TimeoutError",
            Self::Connect => "ConnectError",
            Self::Redirect => "TooManyRedirects",
            Self::Request => "RequestError",
            Self::Body => "BodyError",
            Self::Decode => "DecodingError",
            Self::InvalidUrl => "InvalidURL",
            Self::Transport => "TransportError",
        }
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of a single GET request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum FetchOutcome {
    /// A response was received; any HTTP status counts
    Success {
        status: u16,
        #[serde(rename = "elapsed_seconds", with = "duration_secs")]
        elapsed: Duration,
    },
    /// The request failed at the transport level
    Failure { kind: FetchErrorKind },
}

impl FetchOutcome {
    pub fn success(status: u16, elapsed: Duration) -> Self {
        Self::Success { status, elapsed }
    }

    pub fn failure(kind: FetchErrorKind) -> Self {
        Self::Failure { kind }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Elapsed time in seconds, only for successful requests
    pub fn elapsed_secs(&self) -> Option<f64> {
        match self {
            Self::Success { elapsed, .. } => Some(elapsed.as_secs_f64()),
            Self::Failure { .. } => None,
        }
    }
}

/// A URL paired with the outcome of fetching it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    pub url: String,
    #[serde(flatten)]
    pub outcome: FetchOutcome,
}

impl FetchResult {
    pub fn new(url: impl Into<String>, outcome: FetchOutcome) -> Self {
        Self { url: url.into(), outcome }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn elapsed_secs(&self) -> Option<f64> {
        self.outcome.elapsed_secs()
    }
}

impl fmt::Display for FetchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            FetchOutcome::Success { status, elapsed } => {
                write!(f, "{} {} {:.3}s", self.url, status, elapsed.as_secs_f64())
            }
            FetchOutcome::Failure { kind } => write!(f, "{} {}", self.url, kind),
        }
    }
}

/// Serialize a `Duration` as fractional seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
