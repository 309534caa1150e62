//! Concrete portal client for the careers portal.
//!
//! Performs one authenticated GET against the portal's search page using the
//! caller's stored session cookies, then extracts listings with the selectors
//! in [`crate::parser`].

use crate::{parser, url_builder};
use async_trait::async_trait;
use jobscout_core::ScrapingConfig;
use jobscout_db::CredentialBundle;
use jobscout_portal::{JobResult, PortalClient, Result, ScrapeError};
use reqwest::{header, redirect, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Portal client for the careers portal search page.
pub struct CareersOnlineClient {
    http: reqwest::Client,
    search_url: String,
}

impl CareersOnlineClient {
    /// Build a client from the scraping configuration.
    ///
    /// The request timeout lives here, on the client's own network layer,
    /// not in the orchestrator.
    ///
    /// # Errors
    /// Returns `ScrapeError::Unknown` if the HTTP client cannot be built.
    pub fn new(config: &ScrapingConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(redirect::Policy::limited(5))
            .build()
            .map_err(|e| ScrapeError::Unknown(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            search_url: config.careers_online_url.clone(),
        })
    }
}

#[async_trait]
impl PortalClient for CareersOnlineClient {
    async fn extract(
        &self,
        credentials: &CredentialBundle,
        keywords: &str,
        location: &str,
        username: &str,
    ) -> Result<JobResult> {
        let url = url_builder::build_search_url(&self.search_url, keywords, location, username)?;

        debug!(username, keywords, location, "requesting portal search page");

        let response = self
            .http
            .get(url)
            .header(header::COOKIE, credentials.header_value())
            .send()
            .await
            .map_err(classify_request_error)?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            return Err(ScrapeError::InvalidInput(format!(
                "portal rejected search parameters with HTTP {status}"
            )));
        }
        if status.is_server_error() {
            return Err(ScrapeError::SourceUnreachable(format!(
                "portal returned HTTP {status}"
            )));
        }
        if !status.is_success() {
            return Err(ScrapeError::Unknown(format!(
                "unexpected portal response: HTTP {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::Unknown(format!("failed to read portal response: {e}")))?;

        let listings = parser::parse_listings(&body)?;

        debug!(count = listings.len(), "portal extraction complete");

        Ok(JobResult::new(listings))
    }
}

fn classify_request_error(error: reqwest::Error) -> ScrapeError {
    if error.is_connect() || error.is_timeout() {
        ScrapeError::SourceUnreachable(error.to_string())
    } else {
        ScrapeError::Unknown(error.to_string())
    }
}
