//! Shared types used across the Jobscout service.
//!
//! This module defines common newtypes and the validated search request that
//! provide type safety and clear domain modeling.

use crate::error::JobscoutError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Newtype for user identifiers with validation.
///
/// User IDs must be valid UUIDs (v4 format).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Create a new `UserId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID is not a valid UUID v4.
    pub fn new(id: impl Into<String>) -> Result<Self, JobscoutError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Create a new random `UserId` using UUID v4.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate that a string is a valid UUID v4.
    fn validate(id: &str) -> Result<(), JobscoutError> {
        static UUID_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = UUID_REGEX.get_or_init(|| {
            Regex::new(r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
                .expect("valid regex")
        });

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(JobscoutError::Validation(format!(
                "invalid user ID: must be a valid UUID v4, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for portal identifiers with validation.
///
/// Portal IDs must be lowercase alphanumeric with hyphens, 3-50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PortalId(String);

impl PortalId {
    /// Create a new `PortalId` from a string.
    ///
    /// # Errors
    /// Returns error if the ID doesn't match the required format.
    pub fn new(id: impl Into<String>) -> Result<Self, JobscoutError> {
        let id = id.into();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Validate portal ID format: lowercase alphanumeric with hyphens, 3-50 chars.
    fn validate(id: &str) -> Result<(), JobscoutError> {
        static PORTAL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PORTAL_REGEX
            .get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]{1,48}[a-z0-9]$").expect("valid regex"));

        if id.len() < 3 || id.len() > 50 {
            return Err(JobscoutError::Validation(format!(
                "invalid portal ID: must be 3-50 characters, got {} characters",
                id.len()
            )));
        }

        if regex.is_match(id) {
            Ok(())
        } else {
            Err(JobscoutError::Validation(format!(
                "invalid portal ID: must be lowercase alphanumeric with hyphens, got '{id}'"
            )))
        }
    }
}

impl fmt::Display for PortalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype for portal usernames.
///
/// Usernames must be non-empty after trimming and at most 64 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new `Username` from a string.
    ///
    /// The value is trimmed before validation.
    ///
    /// # Errors
    /// Returns error if the username is empty after trimming or longer than
    /// 64 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, JobscoutError> {
        let name = name.into();
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(JobscoutError::Validation(
                "invalid username: must not be empty".to_string(),
            ));
        }

        if trimmed.len() > 64 {
            return Err(JobscoutError::Validation(format!(
                "invalid username: must be at most 64 characters, got {}",
                trimmed.len()
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Get the inner string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A verified caller identity.
///
/// Derived from a verified bearer token by the authentication layer; never
/// constructed directly from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable user identifier
    pub user_id: UserId,
    /// Username on the portal
    pub username: Username,
    /// Portal this identity is bound to
    pub portal: PortalId,
}

/// A validated job search request.
///
/// Both fields are required and must be non-empty after trimming. The stored
/// values are trimmed; once constructed the request is immutable. There is no
/// `Deserialize` impl: requests only come into existence through [`Self::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    keywords: String,
    location: String,
}

impl SearchRequest {
    /// Create a new `SearchRequest`, trimming and validating both fields.
    ///
    /// # Errors
    /// Returns error if either field is empty after trimming.
    pub fn new(
        keywords: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, JobscoutError> {
        let keywords = keywords.into().trim().to_string();
        let location = location.into().trim().to_string();

        if keywords.is_empty() {
            return Err(JobscoutError::Validation(
                "search keywords must not be empty".to_string(),
            ));
        }

        if location.is_empty() {
            return Err(JobscoutError::Validation(
                "search location must not be empty".to_string(),
            ));
        }

        Ok(Self { keywords, location })
    }

    /// Get the search keywords.
    #[must_use]
    pub fn keywords(&self) -> &str {
        &self.keywords
    }

    /// Get the search location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}
