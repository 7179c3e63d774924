//! Tracker service access layer
//!
//! This module provides a trait-based abstraction over the HTTP calls made
//! to the tracker, allowing a real HTTP implementation and a scripted mock
//! for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Transport] trait. Implementations:
//!
//! - [http::HttpTransport]: blocking `reqwest` client with a fixed timeout
//! - [mock::MockTransport]: scripted responses, records every request
//!
//! On top of the transport sit the two workflows that touch the network:
//!
//! - [fetcher::StoryFetcher]: reads story details, fatal on connectivity loss
//! - [labeler::StoryLabeler]: posts release labels, never fatal
//!
//! ```rust
//! # use tracker_publish::config::TrackerSettings;
//! # use tracker_publish::domain::StoryId;
//! # use tracker_publish::tracker::{MockTransport, StoryFetcher};
//! # fn example(settings: &TrackerSettings) -> tracker_publish::Result<()> {
//! let transport = MockTransport::new();
//! let details = StoryFetcher::new(settings, &transport).fetch_all(&[StoryId::from("1")])?;
//! # Ok(())
//! # }
//! ```

pub mod fetcher;
pub mod http;
pub mod labeler;
pub mod mock;

pub use fetcher::StoryFetcher;
pub use http::HttpTransport;
pub use labeler::{StoryLabeler, TagSummary};
pub use mock::MockTransport;

use crate::config::TrackerSettings;
use crate::domain::StoryId;
use std::fmt;
use std::time::Duration;

/// Timeout applied to every tracker request.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the tracker API token.
pub const TOKEN_HEADER: &str = "X-TrackerToken";

/// HTTP method used against the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A single request to the tracker service
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl TrackerRequest {
    /// GET request carrying the standard tracker headers
    pub fn get(url: impl Into<String>, token: &str) -> Self {
        TrackerRequest {
            method: Method::Get,
            url: url.into(),
            headers: tracker_headers(token),
            body: None,
        }
    }

    /// POST request with a JSON body and the standard tracker headers
    pub fn post_json(url: impl Into<String>, token: &str, body: &serde_json::Value) -> Self {
        TrackerRequest {
            method: Method::Post,
            url: url.into(),
            headers: tracker_headers(token),
            body: Some(body.to_string()),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerResponse {
    pub status: u16,
    pub body: String,
}

impl TrackerResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        TrackerResponse {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        TrackerResponse::new(200, body)
    }

    /// Only 200 counts as success for the tracker endpoints used here.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// A request that produced no response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection refused, DNS failure, or the request timed out
    Connection(String),
    /// Anything else (malformed request, TLS setup, body read failure, ...)
    Other(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Connection(reason) => write!(f, "connection failed: {}", reason),
            TransportError::Other(reason) => f.write_str(reason),
        }
    }
}

impl std::error::Error for TransportError {}

/// HTTP access to the tracker
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync`.
///
/// ## Error Handling
///
/// Any response, whatever its status, is `Ok`. `Err` is reserved for
/// requests that never produced a response; the caller decides whether
/// that is fatal.
pub trait Transport: Send + Sync {
    /// Send one request and wait for the response (bounded by [HTTP_TIMEOUT])
    fn send(&self, request: &TrackerRequest) -> Result<TrackerResponse, TransportError>;
}

/// Headers sent with every tracker request
pub fn tracker_headers(token: &str) -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
        (TOKEN_HEADER.to_string(), token.to_string()),
    ]
}

/// `{base}/services/v5/projects/{project_id}/stories/{story_id}`
pub fn story_url(settings: &TrackerSettings, story_id: &StoryId) -> String {
    format!(
        "{}/services/v5/projects/{}/stories/{}",
        settings.tracker_url, settings.project_id, story_id
    )
}

/// `{base}/services/v5/projects/{project_id}/stories/{story_id}/labels`
pub fn labels_url(settings: &TrackerSettings, story_id: &StoryId) -> String {
    format!("{}/labels", story_url(settings, story_id))
}
