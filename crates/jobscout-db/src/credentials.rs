//! Stored portal session credentials.
//!
//! Each user has at most one credential bundle per portal: the session cookies
//! captured when they last authenticated against that portal. The bundle is
//! opaque to the rest of the system; only the portal client interprets it.

use crate::error::{DatabaseError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

/// A single stored session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie is scoped to
    pub domain: String,
    /// Path the cookie is scoped to
    #[serde(default = "default_path")]
    pub path: String,
}

fn default_path() -> String {
    "/".to_string()
}

/// Stored session material scoped to one (user, portal) pair.
///
/// Borrowed read-only by the scrape orchestrator for the duration of a
/// single scrape call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialBundle {
    cookies: Vec<SessionCookie>,
}

impl CredentialBundle {
    /// Create a bundle from a set of session cookies.
    #[must_use]
    pub fn new(cookies: Vec<SessionCookie>) -> Self {
        Self { cookies }
    }

    /// Get the stored cookies.
    #[must_use]
    pub fn cookies(&self) -> &[SessionCookie] {
        &self.cookies
    }

    /// Render the bundle as a `Cookie` request header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        self.cookies
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Whether the bundle contains no cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

/// Look up the stored credential bundle for a (user, portal) pair.
///
/// # Errors
/// Returns `DatabaseError::NotFound` if no credentials are stored for the pair.
pub async fn lookup(pool: &SqlitePool, user_id: &str, portal: &str) -> Result<CredentialBundle> {
    let row = sqlx::query("SELECT cookies FROM credentials WHERE user_id = ? AND portal = ?")
        .bind(user_id)
        .bind(portal)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)?;

    let cookies_json: String = row.try_get("cookies")?;
    let cookies: Vec<SessionCookie> = serde_json::from_str(&cookies_json)
        .map_err(|e| DatabaseError::Decode(format!("invalid stored cookies: {e}")))?;

    Ok(CredentialBundle::new(cookies))
}

/// Store (or replace) the credential bundle for a (user, portal) pair.
///
/// # Errors
/// Returns `DatabaseError` if serialization or the upsert fails.
pub async fn store(
    pool: &SqlitePool,
    user_id: &str,
    portal: &str,
    bundle: &CredentialBundle,
) -> Result<()> {
    let cookies_json = serde_json::to_string(bundle.cookies())
        .map_err(|e| DatabaseError::Decode(format!("failed to serialize cookies: {e}")))?;

    sqlx::query(
        "INSERT INTO credentials (user_id, portal, cookies, updated_at)
         VALUES (?, ?, ?, ?)
         ON CONFLICT(user_id, portal) DO UPDATE SET cookies = excluded.cookies,
                                                    updated_at = excluded.updated_at",
    )
    .bind(user_id)
    .bind(portal)
    .bind(&cookies_json)
    .bind(Utc::now().to_rfc3339())
    .execute(pool)
    .await?;

    tracing::debug!(user_id, portal, "stored credential bundle");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::ConnectionPool;
    use crate::migrations::run_migrations;
    use crate::users::create_user;

    const USER_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    async fn setup_pool() -> ConnectionPool {
        let pool = ConnectionPool::new(":memory:")
            .await
            .expect("create in-memory pool");
        run_migrations(pool.pool()).await.expect("run migrations");
        create_user(
            pool.pool(),
            USER_ID.to_string(),
            "z1234567".to_string(),
            "careers-online".to_string(),
        )
        .await
        .expect("create test user");
        pool
    }

    fn test_bundle() -> CredentialBundle {
        CredentialBundle::new(vec![
            SessionCookie {
                name: "session".to_string(),
                value: "abc123".to_string(),
                domain: "careersonline.example.edu".to_string(),
                path: "/".to_string(),
            },
            SessionCookie {
                name: "csrf".to_string(),
                value: "xyz".to_string(),
                domain: "careersonline.example.edu".to_string(),
                path: "/".to_string(),
            },
        ])
    }

    #[tokio::test]
    async fn test_store_and_lookup() {
        let pool = setup_pool().await;
        let bundle = test_bundle();

        store(pool.pool(), USER_ID, "careers-online", &bundle)
            .await
            .expect("store bundle");

        let fetched = lookup(pool.pool(), USER_ID, "careers-online")
            .await
            .expect("lookup bundle");
        assert_eq!(fetched, bundle);
    }

    #[tokio::test]
    async fn test_lookup_missing() {
        let pool = setup_pool().await;

        let result = lookup(pool.pool(), USER_ID, "careers-online").await;
        assert!(matches!(result, Err(DatabaseError::NotFound)));
    }

    #[tokio::test]
    async fn test_store_replaces_existing() {
        let pool = setup_pool().await;

        store(pool.pool(), USER_ID, "careers-online", &test_bundle())
            .await
            .expect("store first bundle");

        let replacement = CredentialBundle::new(vec![SessionCookie {
            name: "session".to_string(),
            value: "new-value".to_string(),
            domain: "careersonline.example.edu".to_string(),
            path: "/".to_string(),
        }]);
        store(pool.pool(), USER_ID, "careers-online", &replacement)
            .await
            .expect("store replacement");

        let fetched = lookup(pool.pool(), USER_ID, "careers-online")
            .await
            .expect("lookup bundle");
        assert_eq!(fetched, replacement);
    }

    #[test]
    fn test_header_value() {
        let bundle = test_bundle();
        assert_eq!(bundle.header_value(), "session=abc123; csrf=xyz");
    }

    #[test]
    fn test_cookie_path_defaults() {
        let cookie: SessionCookie = serde_json::from_str(
            r#"{"name":"session","value":"abc","domain":"example.edu"}"#,
        )
        .expect("parse cookie without path");
        assert_eq!(cookie.path, "/");
    }
}
