//! Data models and structures for urlstat

pub mod config;
pub mod metrics;

// Re-export main model types
pub use config::Config;
pub use metrics::{FetchErrorKind, FetchOutcome, FetchResult};
