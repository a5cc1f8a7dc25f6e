//! Shared helpers for unit tests

use crate::http::{Fetch, FetchRequest, FetchResponse};
use brick_common::{BrickError, BrickResult};
use std::cell::RefCell;
use std::collections::HashMap;

/// Canned responses keyed by URL. Unknown URLs answer 404.
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, (u16, String)>,
    unreachable: Vec<String>,
    calls: RefCell<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, status: u16, body: &str) -> Self {
        self.responses
            .insert(url.to_string(), (status, body.to_string()));
        self
    }

    /// Requests to `url` fail at the transport level
    pub fn unreachable(mut self, url: &str) -> Self {
        self.unreachable.push(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Fetch for StubFetcher {
    fn get(&self, request: &FetchRequest<'_>) -> BrickResult<FetchResponse> {
        self.calls.borrow_mut().push(request.url.clone());
        if self.unreachable.contains(&request.url) {
            return Err(BrickError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }
        let (status, body) = self
            .responses
            .get(&request.url)
            .cloned()
            .unwrap_or((404, String::new()));
        Ok(FetchResponse { status, body })
    }
}
