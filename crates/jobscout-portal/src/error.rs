use thiserror::Error;

/// Typed failure classification for a single scrape attempt.
///
/// Every variant maps to a distinct caller-visible response; none of the
/// carried detail strings are ever surfaced to the caller.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Request fields failed portal-level validation
    #[error("invalid search input: {0}")]
    InvalidInput(String),

    /// Network/connection failure reaching the target portal
    #[error("portal unreachable: {0}")]
    SourceUnreachable(String),

    /// Portal responded but expected data was absent or malformed
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),

    /// Any other failure; always produces a safe generic response
    #[error("scrape failed: {0}")]
    Unknown(String),
}

/// Result type alias for scrape operations.
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ScrapeError::SourceUnreachable("connection refused".to_string());
        assert_eq!(err.to_string(), "portal unreachable: connection refused");
    }
}
