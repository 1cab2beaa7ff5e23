//! Error types for Veneer

/// Main error type for Veneer operations
#[derive(Debug, thiserror::Error)]
pub enum VeneerError {
    /// Network-related errors
    #[error("network error: {0}")]
    Network(#[from] NetworkError),
    /// Parsing errors
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    /// Configuration errors
    #[error("config error: {0}")]
    Config(String),
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Network-specific errors
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// URL could not be parsed or joined
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    /// Scheme no loader knows how to fetch
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
    /// Request could not be completed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// Request timed out
    #[error("request timed out")]
    Timeout,
    /// Response body could not be read
    #[error("failed to read body: {0}")]
    Body(String),
}

/// Parsing-specific errors
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// HTML parsing error
    #[error("HTML parse error: {0}")]
    HtmlParse(String),
    /// Selector parsing error
    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },
}

impl From<url::ParseError> for VeneerError {
    fn from(err: url::ParseError) -> Self {
        Self::Network(NetworkError::InvalidUrl(err.to_string()))
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_body() || err.is_decode() {
            Self::Body(err.to_string())
        } else {
            Self::ConnectionFailed(err.to_string())
        }
    }
}

/// Convenience Result type for Veneer operations
pub type Result<T> = std::result::Result<T, VeneerError>;
