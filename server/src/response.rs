//! Mapping from orchestration outcomes to transport responses.
//!
//! Every failure maps to a generic, non-leaking message distinguishing only
//! the category the client needs; internal error detail never surfaces.

use axum::http::StatusCode;
use axum::Json;
use jobscout_auth::AuthError;
use jobscout_portal::{JobResult, ScrapeError};
use jobscout_scraper::SearchError;
use serde_json::{json, Value as JsonValue};

/// The complete outcome of one `/jobs` request.
pub enum ScrapeOutcome {
    /// Scrape completed; audit handled per policy
    Success(JobResult),
    /// Authentication failed before any scrape attempt
    Auth(AuthError),
    /// The search cycle failed after authentication
    Search(SearchError),
}

/// Map an outcome to its status code and JSON payload.
#[must_use]
pub fn map_outcome(outcome: ScrapeOutcome) -> (StatusCode, Json<JsonValue>) {
    match outcome {
        ScrapeOutcome::Success(jobs) => (
            StatusCode::OK,
            Json(json!({ "jobs": jobs.into_listings() })),
        ),
        ScrapeOutcome::Auth(AuthError::Expired) => message(StatusCode::BAD_REQUEST, "Expired token."),
        ScrapeOutcome::Auth(AuthError::Malformed) => message(StatusCode::BAD_REQUEST, "Invalid token."),
        ScrapeOutcome::Auth(AuthError::LookupFailed(_)) | ScrapeOutcome::Search(SearchError::Audit(_)) => {
            message(StatusCode::BAD_REQUEST, "Error fetching data from database.")
        }
        ScrapeOutcome::Search(SearchError::Scrape(ScrapeError::InvalidInput(_))) => {
            message(StatusCode::BAD_REQUEST, "Invalid inputs.")
        }
        ScrapeOutcome::Search(SearchError::Scrape(ScrapeError::SourceUnreachable(_))) => {
            message(StatusCode::NOT_FOUND, "Error connecting to data source.")
        }
        ScrapeOutcome::Search(SearchError::Scrape(ScrapeError::ExtractionFailed(_))) => {
            message(StatusCode::BAD_REQUEST, "Error processing extracted data.")
        }
        // No trailing period; existing consumers match on this exact string
        ScrapeOutcome::Search(SearchError::Scrape(ScrapeError::Unknown(_))) => {
            message(StatusCode::BAD_REQUEST, "Error extracting data")
        }
    }
}

fn message(status: StatusCode, text: &str) -> (StatusCode, Json<JsonValue>) {
    (status, Json(json!({ "message": text })))
}
