use crate::tracker::{Method, TrackerRequest, TrackerResponse, Transport, TransportError};
use std::collections::HashMap;
use std::sync::Mutex;

type Outcome = Result<TrackerResponse, TransportError>;

const NOT_FOUND_BODY: &str = r#"{"kind":"error","code":"unfound_resource"}"#;

/// Mock transport for testing without network access
///
/// Responses are scripted per method and URL; anything unscripted answers
/// 404. Every request is recorded in send order.
pub struct MockTransport {
    routes: HashMap<(Method, String), Outcome>,
    requests: Mutex<Vec<TrackerRequest>>,
}

impl MockTransport {
    /// Create a new mock with no scripted routes
    pub fn new() -> Self {
        MockTransport {
            routes: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer `method url` with the given status and body
    pub fn respond(
        &mut self,
        method: Method,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) {
        self.routes
            .insert((method, url.into()), Ok(TrackerResponse::new(status, body)));
    }

    /// Fail `method url` without producing a response
    pub fn fail(&mut self, method: Method, url: impl Into<String>, error: TransportError) {
        self.routes.insert((method, url.into()), Err(error));
    }

    /// All requests sent so far, oldest first
    pub fn requests(&self) -> Vec<TrackerRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// URLs requested so far, oldest first
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &TrackerRequest) -> Result<TrackerResponse, TransportError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        self.routes
            .get(&(request.method, request.url.clone()))
            .cloned()
            .unwrap_or_else(|| Ok(TrackerResponse::new(404, NOT_FOUND_BODY)))
    }
}
