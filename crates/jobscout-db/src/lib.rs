//! Jobscout Database Layer
//!
//! Provides `SQLite` database access using `SQLx` with embedded migrations.
//!
//! # Architecture
//!
//! - **Migrations**: SQL migrations are embedded and versioned using `SQLx`
//! - **Connection Pooling**: Small fixed-size pool with foreign keys enforced
//! - **Query style**: free functions per table module taking `&SqlitePool`
//!
//! # Tables
//!
//! - `users` - registered accounts ([`users`])
//! - `credentials` - stored portal session cookies ([`credentials`])
//! - `searches` - append-only search audit log ([`searches`])
//!
//! # Example
//!
//! ```ignore
//! use jobscout_db::Database;
//!
//! let db = Database::open("jobscout.db").await?;
//! db.run_migrations().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod connection;
pub mod credentials;
pub mod error;
pub mod migrations;
pub mod searches;
pub mod users;

// Re-export commonly used types
pub use connection::ConnectionPool;
pub use credentials::{CredentialBundle, SessionCookie};
pub use error::{DatabaseError, Result};
pub use searches::SearchRecord;
pub use users::UserRecord;

use std::path::Path;

/// High-level database interface.
///
/// This provides a convenient wrapper around [`ConnectionPool`] that handles
/// initialization and migration.
#[derive(Debug, Clone)]
pub struct Database {
    pool: ConnectionPool,
}

impl Database {
    /// Open a database at the given path, creating it if missing.
    ///
    /// # Arguments
    /// * `path` - Path to the database file (or `:memory:` for in-memory)
    ///
    /// # Errors
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let pool = ConnectionPool::new(path).await?;
        Ok(Self { pool })
    }

    /// Run all pending database migrations.
    ///
    /// This should be called after opening a database to ensure the schema
    /// is up to date.
    ///
    /// # Errors
    /// Returns `DatabaseError::Migration` if any migration fails.
    pub async fn run_migrations(&self) -> Result<()> {
        migrations::run_migrations(self.pool.pool()).await
    }

    /// Get the current schema version.
    ///
    /// Returns the number of applied migrations.
    ///
    /// # Errors
    /// Returns `DatabaseError` if the version cannot be queried.
    pub async fn get_schema_version(&self) -> Result<i64> {
        migrations::get_schema_version(self.pool.pool()).await
    }

    /// Get a reference to the underlying `SQLx` pool.
    ///
    /// This allows direct access to the `SQLx` pool for custom queries.
    #[must_use]
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Sqlite> {
        self.pool.pool()
    }

    /// Close the database connection gracefully.
    pub async fn close(self) {
        self.pool.close().await;
    }
}
