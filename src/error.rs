use thiserror::Error;

/// Unified error type for tracker-publish operations.
///
/// Every variant is fatal for the current run. Recoverable conditions
/// (a story that could not be fetched or labeled) are reported as
/// [`crate::warning::StoryWarning`] instead and never reach this type.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No tracker token found in environment. Did you define environment variable '{var}'?")]
    MissingToken { var: String },

    #[error("Tracker unreachable at {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("Unable to decode story detail from {url}: {reason}")]
    Decode { url: String, reason: String },

    #[error("Version error: {0}")]
    Version(String),

    #[error("Config file could not be parsed: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in tracker-publish
pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        TrackerError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        TrackerError::Version(msg.into())
    }

    /// Create a connectivity error for the given URL
    pub fn unreachable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackerError::Unreachable {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Create an unexpected-request error for the given URL
    pub fn request(url: impl Into<String>, reason: impl Into<String>) -> Self {
        TrackerError::Request {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TrackerError::config("missing key project_id");
        assert_eq!(
            err.to_string(),
            "Configuration error: missing key project_id"
        );
    }

    #[test]
    fn test_missing_token_names_variable() {
        let err = TrackerError::MissingToken {
            var: "TRACKER_TOKEN".to_string(),
        };
        assert!(err.to_string().contains("'TRACKER_TOKEN'"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TrackerError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_error_from_toml() {
        let parse_err = toml::from_str::<toml::Value>("project_name = ").unwrap_err();
        let err: TrackerError = parse_err.into();
        assert!(err.to_string().starts_with("Config file could not be parsed"));
    }

    #[test]
    fn test_unreachable_carries_url() {
        let err = TrackerError::unreachable("https://tracker.test/services", "timed out");
        let msg = err.to_string();
        assert!(msg.contains("https://tracker.test/services"));
        assert!(msg.contains("timed out"));
    }

    #[test]
    fn test_every_variant_exits_with_one() {
        let errors = vec![
            TrackerError::config("x"),
            TrackerError::version("x"),
            TrackerError::unreachable("u", "r"),
            TrackerError::request("u", "r"),
            TrackerError::Decode {
                url: "u".to_string(),
                reason: "r".to_string(),
            },
            TrackerError::MissingToken {
                var: "TRACKER_TOKEN".to_string(),
            },
        ];

        for err in errors {
            assert_eq!(err.exit_code(), 1, "unexpected exit code for {}", err);
        }
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (TrackerError::config("x"), "Configuration error"),
            (TrackerError::version("x"), "Version error"),
            (TrackerError::unreachable("u", "r"), "Tracker unreachable"),
            (TrackerError::request("u", "r"), "Request to u failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
