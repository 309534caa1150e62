//! User account lookups.
//!
//! Users are registered out of band (account provisioning is not part of the
//! scrape path); this module resolves a verified token subject to a known user.

use crate::error::{DatabaseError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

/// A registered user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stable user identifier (UUID v4)
    pub id: String,
    /// Username on the portal
    pub username: String,
    /// Portal this user's account belongs to
    pub portal: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Fetch a user by ID.
///
/// # Errors
/// Returns `DatabaseError::NotFound` if no such user exists.
pub async fn get_user(pool: &SqlitePool, user_id: &str) -> Result<UserRecord> {
    let row = sqlx::query("SELECT id, username, portal, created_at FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?
        .ok_or(DatabaseError::NotFound)?;

    row_to_user(&row)
}

/// Create a new user account.
///
/// # Errors
/// Returns `DatabaseError` if the insert fails (e.g. duplicate username).
pub async fn create_user(
    pool: &SqlitePool,
    id: String,
    username: String,
    portal: String,
) -> Result<UserRecord> {
    let created_at = Utc::now();

    sqlx::query("INSERT INTO users (id, username, portal, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(&username)
        .bind(&portal)
        .bind(created_at.to_rfc3339())
        .execute(pool)
        .await?;

    Ok(UserRecord {
        id,
        username,
        portal,
        created_at,
    })
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<UserRecord> {
    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| DatabaseError::Decode(format!("invalid created_at timestamp: {e}")))?
        .with_timezone(&Utc);

    Ok(UserRecord {
        id: row.try_get("id")?,
        username: row.try_get("username")?,
        portal: row.try_get("portal")?,
        created_at,
    })
}
