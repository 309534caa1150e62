//! Scrape orchestrator coordinating one search request end to end.
//!
//! The orchestrator accepts a verified identity plus a validated search
//! request, dispatches exactly one scrape attempt to the portal client bound
//! to the caller's portal, and gates the audit write on scrape success.

use crate::error::{Result, SearchError};
use jobscout_core::{AuditFailurePolicy, Identity, SearchRequest};
use jobscout_db::{searches, CredentialBundle, Database};
use jobscout_portal::{JobResult, PortalRegistry, ScrapeError};
use std::sync::Arc;
use tracing::{error, warn};

/// Orchestrates the scrape-then-audit cycle for search requests.
pub struct ScrapeOrchestrator {
    /// Registry of portal clients, populated at startup
    registry: Arc<PortalRegistry>,
    /// Database for the search audit log
    db: Arc<Database>,
    /// What to do when the audit write fails after a successful scrape
    audit_policy: AuditFailurePolicy,
}

impl ScrapeOrchestrator {
    /// Create a new orchestrator with the default audit policy (`Log`).
    #[must_use]
    pub fn new(registry: Arc<PortalRegistry>, db: Arc<Database>) -> Self {
        Self {
            registry,
            db,
            audit_policy: AuditFailurePolicy::Log,
        }
    }

    /// Set the audit failure policy.
    #[must_use]
    pub fn with_audit_policy(mut self, policy: AuditFailurePolicy) -> Self {
        self.audit_policy = policy;
        self
    }

    /// Perform exactly one scrape attempt for the given identity and request.
    ///
    /// The credentials must be the stored bundle resolved for this identity's
    /// (user, portal) pair; the orchestrator never accepts externally supplied
    /// credentials. There is no retry here: retry policy, if any, belongs to
    /// the portal client's own network layer.
    ///
    /// # Errors
    /// Returns a [`ScrapeError`] classifying the failure.
    pub async fn scrape(
        &self,
        identity: &Identity,
        credentials: &CredentialBundle,
        request: &SearchRequest,
    ) -> std::result::Result<JobResult, ScrapeError> {
        // Request fields are validated at construction; re-check at this
        // boundary anyway since the portal call is the expensive step.
        if request.keywords().trim().is_empty() || request.location().trim().is_empty() {
            return Err(ScrapeError::InvalidInput(
                "keywords and location must be non-empty".to_string(),
            ));
        }

        let client = self.registry.get(&identity.portal).map_err(|e| {
            warn!(portal = %identity.portal, "scrape requested for unregistered portal");
            ScrapeError::Unknown(e.to_string())
        })?;

        client
            .extract(
                credentials,
                request.keywords(),
                request.location(),
                identity.username.as_str(),
            )
            .await
    }

    /// Run the full search cycle: one scrape attempt, then the audit write.
    ///
    /// An audit record is written iff the scrape succeeded. Under the `Log`
    /// policy an audit failure is logged and the scrape result is still
    /// returned; under `Fail` it fails the whole request.
    ///
    /// # Errors
    /// Returns [`SearchError`] on scrape failure, or on audit failure when the
    /// policy is `Fail`.
    pub async fn search(
        &self,
        identity: &Identity,
        credentials: &CredentialBundle,
        request: &SearchRequest,
    ) -> Result<JobResult> {
        let jobs = self.scrape(identity, credentials, request).await?;

        if let Err(e) = searches::record_search(
            self.db.pool(),
            identity.user_id.as_str(),
            request.keywords(),
            request.location(),
        )
        .await
        {
            match self.audit_policy {
                AuditFailurePolicy::Log => {
                    error!(user_id = %identity.user_id, error = %e, "search audit write failed");
                }
                AuditFailurePolicy::Fail => return Err(SearchError::Audit(e)),
            }
        }

        Ok(jobs)
    }
}
