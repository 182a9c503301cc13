use thiserror::Error;

/// ghportfolio error types
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// GitHub answered with a non-success status
    #[error("github api error ({status}): {body}")]
    RemoteApi { status: u16, body: String },

    /// Still rate limited after the whole backoff budget was spent
    #[error("rate limit exceeded after {attempts} attempts")]
    RateLimitExceeded { attempts: u32 },

    /// Response body could not be decoded
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Transport-level failure (DNS, TLS, timeout, ...)
    #[error("http error: {0}")]
    Http(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Worker pool could not be started
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for PortfolioError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for ghportfolio
pub type Result<T> = std::result::Result<T, PortfolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::MalformedResponse("expected array".into());
        assert_eq!(err.to_string(), "malformed response: expected array");
    }

    #[test]
    fn test_remote_api_display_carries_body() {
        let err = PortfolioError::RemoteApi {
            status: 404,
            body: "{\"message\":\"Not Found\"}".into(),
        };
        assert_eq!(
            err.to_string(),
            "github api error (404): {\"message\":\"Not Found\"}"
        );
    }

    #[test]
    fn test_rate_limit_display() {
        let err = PortfolioError::RateLimitExceeded { attempts: 5 };
        assert_eq!(err.to_string(), "rate limit exceeded after 5 attempts");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PortfolioError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
