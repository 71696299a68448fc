use thiserror::Error;

/// Typed failures from one query round-trip. Callers decide whether to
/// retry, fall back to curated data, or surface the error.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The query service answered with a non-success status.
    #[error("query service returned status {0}")]
    Upstream(u16),

    /// The query service did not answer within the configured bound.
    #[error("query service did not respond within the configured timeout")]
    Timeout,

    /// The response body did not carry the expected results envelope.
    #[error("malformed query service response: {0}")]
    Malformed(String),

    /// The request never produced an HTTP status (connect/DNS failures).
    #[error("request to query service failed: {0}")]
    Transport(#[source] reqwest::Error),
}

impl FetchError {
    pub(crate) fn from_request(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_condition() {
        assert_eq!(
            FetchError::Upstream(500).to_string(),
            "query service returned status 500"
        );
        assert!(FetchError::Timeout.to_string().contains("timeout"));
        assert!(
            FetchError::Malformed("missing results".to_string())
                .to_string()
                .contains("missing results")
        );
    }
}
