//! Shared server state injected into handlers.

use jobscout_auth::Authenticator;
use jobscout_scraper::ScrapeOrchestrator;
use std::sync::Arc;

/// Application state shared across requests.
///
/// Everything here is `Arc`-shared and internally synchronized; handlers
/// acquire it per request through axum's `State` extractor. There is no
/// process-wide mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Token verification and credential resolution
    pub authenticator: Arc<Authenticator>,
    /// Scrape-then-audit orchestration core
    pub orchestrator: Arc<ScrapeOrchestrator>,
}
