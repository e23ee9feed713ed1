use std::fmt;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Summary,
    TopPosts,
    Activity,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Summary => "api/live/summary",
            Endpoint::TopPosts => "api/live/top-posts",
            Endpoint::Activity => "api/live/activity",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Endpoint::Summary => "Summary",
            Endpoint::TopPosts => "Top posts",
            Endpoint::Activity => "Activity",
        })
    }
}

/// Failures of a single analytics request. The [Display] form is what ends up on screen.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-2xx status.
    #[error("{endpoint} error: {status} {status_text} – {body}")]
    Request {
        endpoint: Endpoint,
        status: u16,
        status_text: String,
        body: String,
    },

    /// Well-formed success response whose own status flag reports failure.
    #[error("{0}")]
    Semantic(String),

    #[error("{endpoint} error: malformed response: {source}")]
    Parse {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },

    #[error("network error: {0}")]
    Transport(#[from] hyper::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(#[from] hyper::http::Error),

    #[error("invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_message() {
        let err = ClientError::Request {
            endpoint: Endpoint::TopPosts,
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Top posts error: 500 Internal Server Error – boom"
        );
    }
}
