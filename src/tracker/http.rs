use crate::error::{Result, TrackerError};
use crate::tracker::{
    Method, TrackerRequest, TrackerResponse, Transport, TransportError, HTTP_TIMEOUT,
};
use reqwest::blocking::Client;

/// Blocking HTTP transport backed by `reqwest`
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport whose requests time out after [HTTP_TIMEOUT]
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| TrackerError::config(format!("Unable to build HTTP client: {}", e)))?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        request: &TrackerRequest,
    ) -> std::result::Result<TrackerResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let resp = builder.send().map_err(classify)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(classify)?;

        Ok(TrackerResponse { status, body })
    }
}

/// Connect failures and timeouts are connectivity problems; everything else is not.
fn classify(err: reqwest::Error) -> TransportError {
    if err.is_connect() || err.is_timeout() {
        TransportError::Connection(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
