//! urlstat
//!
//! Fetches every URL listed in a file concurrently with a shared,
//! connection-limited HTTP client and reports per-request timings together
//! with average, median and 90th percentile response times.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod models;
pub mod output;
pub mod source;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use app::App;
pub use error::{AppError, Result};
pub use executor::{BatchReport, Dispatcher};
pub use models::{Config, FetchErrorKind, FetchOutcome, FetchResult};
pub use source::{read_urls, UrlSource};
pub use stats::{percentile, LatencyStats, Summary};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_MAX_CONNECTIONS: usize = 300;
    pub const DEFAULT_MAX_KEEP_ALIVE: usize = 30;
    pub const DEFAULT_ALLOW_REDIRECTS: bool = true;
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    /// Redirect hops followed when redirects are enabled
    pub const MAX_REDIRECTS: usize = 20;
}
