//! Search audit log.
//!
//! Every successfully completed scrape appends one row here. The table is
//! append-only: rows are never updated or deleted, and identical searches are
//! not deduplicated. It doubles as the user's search history.

use crate::error::{DatabaseError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};

/// One audited search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRecord {
    /// Unique identifier for this record
    pub id: String,
    /// User who performed the search
    pub user_id: String,
    /// Search keywords as accepted
    pub keywords: String,
    /// Search location as accepted
    pub location: String,
    /// When the search completed
    pub searched_at: DateTime<Utc>,
}

/// Append an audit record for a completed search.
///
/// This is a single independent insert; it is intentionally not wrapped in a
/// transaction with any credential read.
///
/// # Errors
/// Returns `DatabaseError` if the insert fails.
pub async fn record_search(
    pool: &SqlitePool,
    user_id: &str,
    keywords: &str,
    location: &str,
) -> Result<SearchRecord> {
    let id = uuid::Uuid::new_v4().to_string();
    let searched_at = Utc::now();

    sqlx::query(
        "INSERT INTO searches (id, user_id, keywords, location, searched_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(user_id)
    .bind(keywords)
    .bind(location)
    .bind(searched_at.to_rfc3339())
    .execute(pool)
    .await?;

    tracing::debug!(user_id, keywords, location, "recorded search");

    Ok(SearchRecord {
        id,
        user_id: user_id.to_string(),
        keywords: keywords.to_string(),
        location: location.to_string(),
        searched_at,
    })
}

/// Fetch a user's most recent searches, newest first.
///
/// # Errors
/// Returns `DatabaseError` if the query fails.
pub async fn search_history(
    pool: &SqlitePool,
    user_id: &str,
    limit: u32,
) -> Result<Vec<SearchRecord>> {
    let rows = sqlx::query(
        "SELECT id, user_id, keywords, location, searched_at
         FROM searches WHERE user_id = ?
         ORDER BY searched_at DESC, id LIMIT ?",
    )
    .bind(user_id)
    .bind(i64::from(limit))
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let searched_at: String = row.try_get("searched_at")?;
            let searched_at = DateTime::parse_from_rfc3339(&searched_at)
                .map_err(|e| DatabaseError::Decode(format!("invalid searched_at timestamp: {e}")))?
                .with_timezone(&Utc);

            Ok(SearchRecord {
                id: row.try_get("id")?,
                user_id: row.try_get("user_id")?,
                keywords: row.try_get("keywords")?,
                location: row.try_get("location")?,
                searched_at,
            })
        })
        .collect()
}

/// Count audit records for a user.
///
/// # Errors
/// Returns `DatabaseError` if the query fails.
pub async fn count_for_user(pool: &SqlitePool, user_id: &str) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM searches WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}
