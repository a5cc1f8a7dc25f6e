//! Blocking HTTP access
//!
//! Every network read in the crate goes through the [`Fetch`] trait so the
//! caches and resolvers can be exercised against a stub or a mock server.

use brick_common::{BrickResult, ResourceKind};
use reqwest::header::{COOKIE, USER_AGENT};
use std::time::Duration;

/// A single GET request
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    pub kind: ResourceKind,
    pub url: String,
    /// Sent as the User-Agent. The services are queried with the resource's
    /// own key here (theme token, set number or part id).
    pub agent: &'a str,
    pub cookie: Option<&'a str>,
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Source of remote documents.
///
/// A non-success status is a valid response, not an error. Errors are
/// reserved for transport failures (connect, timeout, unreadable body).
pub trait Fetch {
    fn get(&self, request: &FetchRequest<'_>) -> BrickResult<FetchResponse>;
}

/// `reqwest` blocking client with a per-request timeout
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> BrickResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpClient {
    fn get(&self, request: &FetchRequest<'_>) -> BrickResult<FetchResponse> {
        log::info!("Fetching {} ({}): {}", request.kind.label(), request.agent, request.url);

        let mut builder = self
            .client
            .get(&request.url)
            .header(USER_AGENT, request.agent);
        if let Some(cookie) = request.cookie {
            builder = builder.header(COOKIE, cookie);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        log::debug!("{} -> {} ({} bytes)", request.url, status, body.len());

        Ok(FetchResponse { status, body })
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
