//! HTTP routes for the Jobscout service.

use crate::response::{self, ScrapeOutcome};
use crate::state::AppState;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use jobscout_auth::AuthError;
use jobscout_core::SearchRequest;
use jobscout_portal::ScrapeError;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::info;

/// Inbound search body. Key casing is preserved from the original wire format.
#[derive(Debug, Deserialize)]
pub struct SearchBody {
    /// Search keywords
    #[serde(rename = "Keywords")]
    pub keywords: String,
    /// Search location
    #[serde(rename = "Location")]
    pub location: String,
}

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/jobs", post(scrape_jobs))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Liveness probe.
async fn health_check() -> &'static str {
    "ok"
}

/// Scrape the caller's portal for job listings.
///
/// Verifies the bearer token, resolves stored session cookies, performs one
/// scrape attempt, and records the search on success. All failures are
/// converted to typed responses here; nothing propagates past this handler.
pub async fn scrape_jobs(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<SearchBody>,
) -> (StatusCode, Json<JsonValue>) {
    response::map_outcome(run_search(&state, &headers, body).await)
}

async fn run_search(state: &AppState, headers: &HeaderMap, body: SearchBody) -> ScrapeOutcome {
    let Some(token) = bearer_token(headers) else {
        return ScrapeOutcome::Auth(AuthError::Malformed);
    };

    let (identity, credentials) = match state.authenticator.authenticate(token).await {
        Ok(resolved) => resolved,
        Err(e) => return ScrapeOutcome::Auth(e),
    };

    // Boundary validation: reject empty fields before any scrape attempt
    let request = match SearchRequest::new(body.keywords, body.location) {
        Ok(request) => request,
        Err(e) => {
            return ScrapeOutcome::Search(ScrapeError::InvalidInput(e.to_string()).into());
        }
    };

    info!(
        user_id = %identity.user_id,
        portal = %identity.portal,
        keywords = request.keywords(),
        location = request.location(),
        "handling search request"
    );

    match state
        .orchestrator
        .search(&identity, &credentials, &request)
        .await
    {
        Ok(jobs) => ScrapeOutcome::Success(jobs),
        Err(e) => ScrapeOutcome::Search(e),
    }
}

/// Extract the bearer token from the Authorization header, if present.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
