//! Jobscout Portal Capability Layer
//!
//! Defines the [`PortalClient`] capability interface over scraping backends,
//! the opaque [`JobResult`] they return, the typed [`ScrapeError`] failure
//! classification, and the [`PortalRegistry`] that binds concrete client
//! implementations to portal identifiers at startup.
//!
//! Concrete portal clients live outside this crate (see `jobscout-scraper`);
//! this crate only owns the contract between the orchestration core and the
//! scraping backends.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod client;
pub mod error;
pub mod registry;

// Re-export commonly used types
pub use client::{JobResult, PortalClient};
pub use error::{Result, ScrapeError};
pub use registry::{PortalRegistry, RegistryError};
