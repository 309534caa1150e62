//! The portal client capability interface.

use crate::error::Result;
use async_trait::async_trait;
use jobscout_db::CredentialBundle;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Job listings returned by a portal client.
///
/// Listings are opaque to the orchestration core: their shape is decided by
/// the portal, not by Jobscout. There is no partial-success mode; a
/// `JobResult` is always complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobResult {
    listings: Vec<JsonValue>,
}

impl JobResult {
    /// Create a result from a set of listings.
    #[must_use]
    pub fn new(listings: Vec<JsonValue>) -> Self {
        Self { listings }
    }

    /// Get the listings.
    #[must_use]
    pub fn listings(&self) -> &[JsonValue] {
        &self.listings
    }

    /// Consume the result, returning the listings.
    #[must_use]
    pub fn into_listings(self) -> Vec<JsonValue> {
        self.listings
    }

    /// Number of listings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// Whether the result contains no listings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Capability interface over a scraping backend for one portal.
///
/// Concrete implementations are registered by portal identifier at startup
/// (see [`crate::registry::PortalRegistry`]). A client performs exactly one
/// extraction per call; any retry or timeout policy lives inside the client's
/// own network layer, never in the orchestrator.
#[async_trait]
pub trait PortalClient: Send + Sync {
    /// Extract job listings from the portal.
    ///
    /// `credentials` is the caller's stored session material for this portal,
    /// borrowed for the duration of the call. `username` identifies the
    /// portal account the session belongs to.
    ///
    /// # Errors
    /// Returns a [`crate::ScrapeError`] classifying the failure.
    async fn extract(
        &self,
        credentials: &CredentialBundle,
        keywords: &str,
        location: &str,
        username: &str,
    ) -> Result<JobResult>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_result_accessors() {
        let result = JobResult::new(vec![
            json!({"title": "Software Engineer", "employer": "Acme"}),
            json!({"title": "Data Analyst", "employer": "Initech"}),
        ]);

        assert_eq!(result.len(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.listings()[0]["title"], "Software Engineer");
    }

    #[test]
    fn test_job_result_serializes_as_listing_array() {
        let result = JobResult::new(vec![json!({"title": "Engineer"})]);
        let value = serde_json::to_value(&result).expect("serialize job result");
        assert!(value["listings"].is_array());
        assert_eq!(value["listings"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_empty_job_result() {
        let result = JobResult::default();
        assert!(result.is_empty());
        assert_eq!(result.into_listings(), Vec::<JsonValue>::new());
    }
}
