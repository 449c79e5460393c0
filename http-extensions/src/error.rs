//! HTTP extension error types.

use thiserror::Error;

/// Result type for HTTP extension operations.
pub type Result<T> = std::result::Result<T, HttpClientError>;

/// HTTP extension errors.
#[derive(Debug, Error)]
pub enum HttpClientError {
    /// The response carried a body whose media type is not JSON.
    #[error("Content type \"{0}\" not supported")]
    UnsupportedContentType(String),

    /// The request body could not be encoded as JSON.
    #[error("JSON serialization error: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body is not valid JSON for the requested type.
    #[error("JSON deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// A value could not be flattened into query string parameters.
    #[error("Query string encoding error: {0}")]
    QueryEncoding(#[source] serde_urlencoded::ser::Error),

    /// A header name or value could not be used on a request.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The configured base URL or proxy URL is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport or protocol error from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl HttpClientError {
    /// Check if this error came from the underlying HTTP client.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Check if the response was rejected because of its content type.
    pub fn is_unsupported_content_type(&self) -> bool {
        matches!(self, Self::UnsupportedContentType(_))
    }

    /// Get the offending media type of an `UnsupportedContentType` error.
    pub fn media_type(&self) -> Option<&str> {
        match self {
            Self::UnsupportedContentType(media_type) => Some(media_type),
            _ => None,
        }
    }

    /// Get the HTTP status code if the underlying client reported one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
