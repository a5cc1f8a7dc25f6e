//! Tests for the blocking HTTP client

use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::{Fetch, FetchRequest, FetchResponse, HttpClient};
use brick_common::{BrickError, BrickResult, ResourceKind};

fn get_blocking(
    url: String,
    agent: &'static str,
    cookie: Option<&'static str>,
) -> BrickResult<FetchResponse> {
    let client = HttpClient::new(Duration::from_secs(5)).unwrap();
    client.get(&FetchRequest {
        kind: ResourceKind::ThemeYearListing,
        url,
        agent,
        cookie,
    })
}

#[tokio::test]
async fn sends_agent_and_cookie() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sets/theme-alpha-team/year-2001"))
        .and(header("User-Agent", "alpha-team"))
        .and(header("Cookie", "setsPageLength=200"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/sets/theme-alpha-team/year-2001", mock_server.uri());
    let response = tokio::task::spawn_blocking(move || {
        get_blocking(url, "alpha-team", Some("setsPageLength=200"))
    })
    .await
    .unwrap()
    .unwrap();

    assert!(response.is_success());
    assert_eq!(response.body, "<html>ok</html>");
}

#[tokio::test]
async fn non_success_status_is_a_response() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let response = tokio::task::spawn_blocking(move || get_blocking(url, "x", None))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(response.status, 404);
    assert!(!response.is_success());
    assert_eq!(response.body, "not here");
}

#[test]
fn connection_failure_is_an_error() {
    // Nothing listens on port 1
    let result = get_blocking("http://127.0.0.1:1/".to_string(), "x", None);
    assert!(matches!(result, Err(BrickError::Network(_))));
}
