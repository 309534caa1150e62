//! In-memory portal client registry.

use crate::client::PortalClient;
use jobscout_core::PortalId;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::info;

/// Error returned when resolving a portal client fails.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No client registered for the requested portal
    #[error("no portal client registered for '{portal}'")]
    NotRegistered {
        /// The portal that was requested
        portal: String,
    },
}

/// Registry of concrete [`PortalClient`] implementations keyed by portal ID.
///
/// Clients are registered once at startup; lookups during request handling
/// are read-only. This replaces dispatch-by-string scattered through the
/// orchestration core with a single typed lookup point.
#[derive(Clone, Default)]
pub struct PortalRegistry {
    clients: Arc<RwLock<HashMap<PortalId, Arc<dyn PortalClient>>>>,
}

impl PortalRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client for a portal, replacing any existing registration.
    pub fn register(&self, portal: PortalId, client: Arc<dyn PortalClient>) {
        let mut clients = self
            .clients
            .write()
            .expect("acquire write lock on portal clients");

        info!(portal = %portal, "registered portal client");
        clients.insert(portal, client);
    }

    /// Resolve the client registered for a portal.
    ///
    /// # Errors
    /// Returns `RegistryError::NotRegistered` if no client is registered.
    pub fn get(&self, portal: &PortalId) -> Result<Arc<dyn PortalClient>, RegistryError> {
        let clients = self
            .clients
            .read()
            .expect("acquire read lock on portal clients");

        clients
            .get(portal)
            .cloned()
            .ok_or_else(|| RegistryError::NotRegistered {
                portal: portal.to_string(),
            })
    }

    /// All registered portal IDs.
    #[must_use]
    pub fn registered_portals(&self) -> Vec<PortalId> {
        let clients = self
            .clients
            .read()
            .expect("acquire read lock on portal clients");

        clients.keys().cloned().collect()
    }

    /// Number of registered clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients
            .read()
            .expect("acquire read lock on portal clients")
            .len()
    }

    /// Whether the registry has no registered clients.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::JobResult;
    use crate::error::Result as ScrapeResult;
    use async_trait::async_trait;
    use jobscout_db::CredentialBundle;

    struct NullClient;

    #[async_trait]
    impl PortalClient for NullClient {
        async fn extract(
            &self,
            _credentials: &CredentialBundle,
            _keywords: &str,
            _location: &str,
            _username: &str,
        ) -> ScrapeResult<JobResult> {
            Ok(JobResult::default())
        }
    }

    fn portal(id: &str) -> PortalId {
        PortalId::new(id).expect("valid portal id")
    }

    #[test]
    fn test_register_and_get() {
        let registry = PortalRegistry::new();
        assert!(registry.is_empty());

        registry.register(portal("careers-online"), Arc::new(NullClient));

        assert_eq!(registry.len(), 1);
        assert!(registry.get(&portal("careers-online")).is_ok());
    }

    #[test]
    fn test_get_unregistered() {
        let registry = PortalRegistry::new();

        let result = registry.get(&portal("careers-online"));
        assert!(matches!(
            result,
            Err(RegistryError::NotRegistered { portal }) if portal == "careers-online"
        ));
    }

    #[test]
    fn test_register_replaces() {
        let registry = PortalRegistry::new();
        registry.register(portal("careers-online"), Arc::new(NullClient));
        registry.register(portal("careers-online"), Arc::new(NullClient));

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registered_portals() {
        let registry = PortalRegistry::new();
        registry.register(portal("careers-online"), Arc::new(NullClient));
        registry.register(portal("seek"), Arc::new(NullClient));

        let mut portals = registry.registered_portals();
        portals.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(portals, vec![portal("careers-online"), portal("seek")]);
    }
}
