//! Jobscout Scraper
//!
//! Home of the [`ScrapeOrchestrator`] — the core that turns a verified
//! identity plus a validated search request into exactly one scrape attempt
//! and a success-gated audit write — and of the concrete
//! [`CareersOnlineClient`] portal client with its URL building and HTML
//! extraction helpers.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod careers_online;
pub mod error;
pub mod orchestrator;
pub mod parser;
pub mod url_builder;

pub use careers_online::CareersOnlineClient;
pub use error::{Result, SearchError};
pub use orchestrator::ScrapeOrchestrator;
