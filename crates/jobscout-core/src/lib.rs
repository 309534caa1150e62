//! Jobscout Core - Foundation crate for the Jobscout scraping service.
//!
//! This crate provides shared types, error handling, and configuration
//! management that all other Jobscout crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared newtypes (`UserId`, `PortalId`, `Username`) and the
//!   validated [`types::SearchRequest`]
//!
//! # Example
//!
//! ```rust
//! use jobscout_core::{AppConfig, SearchRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::default();
//!
//! let request = SearchRequest::new("Software Engineer", "Sydney")?;
//! assert_eq!(request.keywords(), "Software Engineer");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    AppConfig, AuditConfig, AuditFailurePolicy, AuthConfig, DatabaseConfig, ScrapingConfig,
    ServerConfig,
};
pub use error::{ConfigError, ConfigResult, JobscoutError, Result};
pub use types::{Identity, PortalId, SearchRequest, UserId, Username};
