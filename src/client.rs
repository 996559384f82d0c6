//! Shared HTTP client and request timing

#[cfg(test)]
mod integration_tests;

use crate::{
    error::{AppError, Result},
    models::{Config, FetchErrorKind, FetchOutcome},
};
use async_trait::async_trait;
use reqwest::{redirect, Client, Url};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Anything that can GET a URL and report how it went
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    /// Fetch `url`. Transport failures are part of the outcome, never an `Err`.
    async fn fetch(&self, url: &str) -> FetchOutcome;
}

/// Settings for the shared client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Whole-request timeout, body included
    pub timeout: Duration,
    /// Cap on requests in flight at once
    pub max_connections: usize,
    /// Cap on idle connections kept for reuse
    pub max_keep_alive: usize,
    /// Follow 3xx responses
    pub allow_redirects: bool,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: crate::defaults::DEFAULT_TIMEOUT,
            max_connections: crate::defaults::DEFAULT_MAX_CONNECTIONS,
            max_keep_alive: crate::defaults::DEFAULT_MAX_KEEP_ALIVE,
            allow_redirects: crate::defaults::DEFAULT_ALLOW_REDIRECTS,
            user_agent: default_user_agent(),
        }
    }
}

impl From<&Config> for FetchConfig {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.timeout(),
            max_connections: config.max_connections,
            max_keep_alive: config.max_keep_alive,
            allow_redirects: config.allow_redirects,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::PKG_NAME, crate::VERSION)
}

/// Builds reqwest clients from a [`FetchConfig`]
pub struct ClientFactory;

impl ClientFactory {
    pub fn build(config: &FetchConfig) -> Result<Client> {
        let redirect_policy = if config.allow_redirects {
            redirect::Policy::limited(crate::defaults::MAX_REDIRECTS)
        } else {
            redirect::Policy::none()
        };

        Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_keep_alive)
            .redirect(redirect_policy)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AppError::http_client(format!("Failed to create HTTP client: {}", e)))
    }
}

/// reqwest-backed fetcher shared by every request of a run
#[derive(Clone)]
pub struct UrlClient {
    client: Client,
    config: FetchConfig,
}

impl UrlClient {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = ClientFactory::build(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl HttpFetcher for UrlClient {
    async fn fetch(&self, url: &str) -> FetchOutcome {
        let url = match parse_target(url) {
            Some(url) => url,
            None => return FetchOutcome::failure(FetchErrorKind::InvalidUrl),
        };

        let start = Instant::now();
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::failure(classify_error(&e)),
        };

        let status = response.status().as_u16();
        // Elapsed covers the full body, not just the headers
        match response.bytes().await {
            Ok(_) => FetchOutcome::success(status, start.elapsed()),
            Err(e) => FetchOutcome::failure(classify_error(&e)),
        }
    }
}

/// Parse a URL line into something reqwest will send
fn parse_target(url: &str) -> Option<Url> {
    let parsed = Url::parse(url).ok()?;
    match parsed.scheme() {
        "http" | "https" => Some(parsed),
        _ => None,
    }
}

/// Map a reqwest error onto the kind printed for the request
pub fn classify_error(error: &reqwest::Error) -> FetchErrorKind {
    if error.is_timeout() {
        FetchErrorKind::Timeout
    } else if error.is_redirect() {
        FetchErrorKind::Redirect
    } else if error.is_connect() {
        FetchErrorKind::Connect
    } else if error.is_body() {
        FetchErrorKind::Body
    } else if error.is_decode() {
        FetchErrorKind::Decode
    } else if error.is_builder() {
        FetchErrorKind::InvalidUrl
    } else if error.is_request() {
        FetchErrorKind::Request
    } else {
        FetchErrorKind::Transport
    }
}
