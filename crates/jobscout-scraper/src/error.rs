use jobscout_db::DatabaseError;
use jobscout_portal::ScrapeError;
use thiserror::Error;

/// Failure of a complete search-and-audit cycle.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The scrape attempt itself failed
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    /// The scrape succeeded but the audit write failed under the `Fail` policy
    #[error("audit write failed: {0}")]
    Audit(#[from] DatabaseError),
}

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;
