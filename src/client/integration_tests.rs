//! HTTP client integration tests against a local mock server

use super::*;
use std::net::TcpListener;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock HTTP server for controlled testing scenarios
pub struct MockHttpServer {
    server: MockServer,
}

impl MockHttpServer {
    pub async fn new() -> Self {
        Self { server: MockServer::start().await }
    }

    pub fn url(&self, request_path: &str) -> String {
        format!("{}{}", self.server.uri(), request_path)
    }

    /// GET `request_path` answers `status` after `delay`
    pub async fn mock_status(&self, request_path: &str, status: u16, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string("OK").set_delay(delay))
            .mount(&self.server)
            .await;
    }

    /// GET `from_path` redirects to `to_path`
    pub async fn mock_redirect(&self, from_path: &str, to_path: &str) {
        Mock::given(method("GET"))
            .and(path(from_path))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", to_path))
            .mount(&self.server)
            .await;
    }
}

fn fetch_config(timeout: Duration, allow_redirects: bool) -> FetchConfig {
    FetchConfig {
        timeout,
        allow_redirects,
        ..FetchConfig::default()
    }
}

/// An address nothing listens on
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}

#[tokio::test]
async fn test_success_records_status_and_elapsed() {
    let server = MockHttpServer::new().await;
    server.mock_status("/ok", 200, Duration::from_millis(100)).await;

    let client = UrlClient::new(fetch_config(Duration::from_secs(5), true)).unwrap();
    match client.fetch(&server.url("/ok")).await {
        FetchOutcome::Success { status, elapsed } => {
            assert_eq!(status, 200);
            assert!(elapsed >= Duration::from_millis(100));
            assert!(elapsed < Duration::from_secs(5));
        }
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_is_still_a_response() {
    let server = MockHttpServer::new().await;
    server.mock_status("/missing", 404, Duration::ZERO).await;
    server.mock_status("/broken", 503, Duration::ZERO).await;

    let client = UrlClient::new(fetch_config(Duration::from_secs(5), true)).unwrap();
    let missing = client.fetch(&server.url("/missing")).await;
    let broken = client.fetch(&server.url("/broken")).await;

    assert!(matches!(missing, FetchOutcome::Success { status: 404, .. }));
    assert!(matches!(broken, FetchOutcome::Success { status: 503, .. }));
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let server = MockHttpServer::new().await;
    server.mock_status("/slow", 200, Duration::from_secs(3)).await;

    let client = UrlClient::new(fetch_config(Duration::from_millis(300), true)).unwrap();
    let outcome = client.fetch(&server.url("/slow")).await;

    assert_eq!(outcome, FetchOutcome::failure(FetchErrorKind::Timeout));
}

#[tokio::test]
async fn test_connection_refused_is_classified() {
    let client = UrlClient::new(fetch_config(Duration::from_secs(5), true)).unwrap();
    let outcome = client.fetch(&closed_port_url()).await;

    assert_eq!(outcome, FetchOutcome::failure(FetchErrorKind::Connect));
}

#[tokio::test]
async fn test_redirects_followed_when_allowed() {
    let server = MockHttpServer::new().await;
    server.mock_redirect("/old", "/new").await;
    server.mock_status("/new", 200, Duration::ZERO).await;

    let client = UrlClient::new(fetch_config(Duration::from_secs(5), true)).unwrap();
    let outcome = client.fetch(&server.url("/old")).await;

    assert!(matches!(outcome, FetchOutcome::Success { status: 200, .. }));
}

#[tokio::test]
async fn test_redirects_reported_when_disallowed() {
    let server = MockHttpServer::new().await;
    server.mock_redirect("/old", "/new").await;
    server.mock_status("/new", 200, Duration::ZERO).await;

    let client = UrlClient::new(fetch_config(Duration::from_secs(5), false)).unwrap();
    let outcome = client.fetch(&server.url("/old")).await;

    assert!(matches!(outcome, FetchOutcome::Success { status: 302, .. }));
}

#[tokio::test]
async fn test_redirect_loop_is_classified() {
    let server = MockHttpServer::new().await;
    server.mock_redirect("/loop", "/loop").await;

    let client = UrlClient::new(fetch_config(Duration::from_secs(5), true)).unwrap();
    let outcome = client.fetch(&server.url("/loop")).await;

    assert_eq!(outcome, FetchOutcome::failure(FetchErrorKind::Redirect));
}

#[tokio::test]
async fn test_unsupported_scheme_is_invalid() {
    let client = UrlClient::new(fetch_config(Duration::from_secs(5), true)).unwrap();
    let outcome = client.fetch("ftp://files.example.com/readme").await;

    assert_eq!(outcome, FetchOutcome::failure(FetchErrorKind::InvalidUrl));
}
