//! Jobscout HTTP server.
//!
//! Thin shell that wires configuration, the database, the portal registry,
//! and the orchestration core into an axum router. Core business logic lives
//! in the `crates/` directory.

mod response;
mod routes;
mod state;

use anyhow::Context;
use jobscout_auth::{Authenticator, TokenVerifier};
use jobscout_core::{AppConfig, PortalId};
use jobscout_db::Database;
use jobscout_portal::PortalRegistry;
use jobscout_scraper::{CareersOnlineClient, ScrapeOrchestrator};
use state::AppState;
use std::sync::Arc;
use tracing::info;

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,jobscout=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Jobscout v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load_with_env().context("failed to load configuration")?;

    if config.auth.token_secret.is_empty() {
        anyhow::bail!(
            "no token secret configured; set auth.token_secret or JOBSCOUT_TOKEN_SECRET"
        );
    }

    let db = Database::open(&config.database.path)
        .await
        .context("failed to open database")?;
    db.run_migrations()
        .await
        .context("failed to run database migrations")?;
    let db = Arc::new(db);

    let registry = Arc::new(PortalRegistry::new());
    let careers_online = CareersOnlineClient::new(&config.scraping)
        .context("failed to build careers portal client")?;
    registry.register(
        PortalId::new("careers-online").context("invalid portal id")?,
        Arc::new(careers_online),
    );
    info!(portals = registry.len(), "portal registry populated");

    let state = AppState {
        authenticator: Arc::new(Authenticator::new(
            TokenVerifier::new(&config.auth.token_secret, config.auth.leeway_secs),
            db.clone(),
        )),
        orchestrator: Arc::new(
            ScrapeOrchestrator::new(registry, db).with_audit_policy(config.audit.on_failure),
        ),
    };

    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_addr))?;
    info!("Listening on {}", config.server.bind_addr);

    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}
