//! Jobscout Authentication Layer
//!
//! Verifies bearer tokens and resolves them to a caller identity plus the
//! stored portal credentials for that identity.
//!
//! # Flow
//!
//! 1. **Verify**: [`TokenVerifier`] checks the token's HMAC signature and
//!    expiry and decodes its claims.
//! 2. **Resolve**: [`Authenticator`] maps the token subject to a registered
//!    user and fetches the credential bundle stored for that user's portal.
//!
//! Token issuance is out of scope; only verification happens here. The whole
//! layer is read-only — a failed or successful authentication has no side
//! effects.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

use jobscout_core::{Identity, PortalId, UserId, Username};
use jobscout_db::{credentials, users, CredentialBundle, Database, DatabaseError};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Authentication errors.
///
/// All variants are terminal for a single request; nothing here is retried.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token signature is valid but the token has expired
    #[error("token expired")]
    Expired,

    /// Token is malformed or its signature does not verify
    #[error("token malformed or signature invalid")]
    Malformed,

    /// Token verified but the subject, portal, or stored credentials could
    /// not be resolved
    #[error("credential lookup failed: {0}")]
    LookupFailed(String),
}

/// Result type for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Claims carried in a Jobscout bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user ID
    pub sub: String,
    /// Portal the session is bound to
    pub portal: String,
    /// Expiry as seconds since the Unix epoch
    pub exp: usize,
    /// Issued-at as seconds since the Unix epoch
    pub iat: usize,
}

/// Verifies bearer token signatures and expiry.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for HS256 tokens signed with the given secret.
    ///
    /// `leeway_secs` is the clock skew tolerated when checking expiry.
    #[must_use]
    pub fn new(secret: &str, leeway_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway_secs;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and decode its claims.
    ///
    /// # Errors
    /// Returns `AuthError::Expired` for an expired token; any other decode
    /// or signature failure is `AuthError::Malformed`.
    pub fn verify(&self, token: &str) -> Result<TokenClaims> {
        match decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AuthError::Expired),
                _ => Err(AuthError::Malformed),
            },
        }
    }
}

/// Resolves verified tokens to an [`Identity`] and stored credentials.
pub struct Authenticator {
    verifier: TokenVerifier,
    db: Arc<Database>,
}

impl Authenticator {
    /// Create an authenticator from a verifier and database handle.
    #[must_use]
    pub fn new(verifier: TokenVerifier, db: Arc<Database>) -> Self {
        Self { verifier, db }
    }

    /// Verify a bearer token and resolve the caller's identity and stored
    /// credential bundle.
    ///
    /// The returned bundle always belongs to the (user, portal) pair resolved
    /// from the token; there is no way to substitute external credentials.
    ///
    /// # Errors
    /// - `Expired` / `Malformed` from token verification
    /// - `LookupFailed` if the user, portal, or credentials cannot be resolved
    pub async fn authenticate(&self, token: &str) -> Result<(Identity, CredentialBundle)> {
        let claims = self.verifier.verify(token)?;

        let user = users::get_user(self.db.pool(), &claims.sub)
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound => {
                    tracing::warn!("token subject does not match a registered user");
                    AuthError::LookupFailed("unknown user".to_string())
                }
                other => AuthError::LookupFailed(other.to_string()),
            })?;

        // A token bound to a different portal than the account is treated the
        // same as a missing credential record.
        if user.portal != claims.portal {
            tracing::warn!(
                user_id = %user.id,
                "token portal does not match the user's registered portal"
            );
            return Err(AuthError::LookupFailed(
                "portal does not match registered account".to_string(),
            ));
        }

        let portal = PortalId::new(&claims.portal).map_err(|_| AuthError::Malformed)?;
        let user_id =
            UserId::new(&user.id).map_err(|e| AuthError::LookupFailed(e.to_string()))?;
        let username =
            Username::new(&user.username).map_err(|e| AuthError::LookupFailed(e.to_string()))?;

        let bundle = credentials::lookup(self.db.pool(), user_id.as_str(), portal.as_str())
            .await
            .map_err(|e| match e {
                DatabaseError::NotFound => {
                    AuthError::LookupFailed("no stored credentials for portal".to_string())
                }
                other => AuthError::LookupFailed(other.to_string()),
            })?;

        Ok((
            Identity {
                user_id,
                username,
                portal,
            },
            bundle,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobscout_db::SessionCookie;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret-key-256-bits-or-thereabouts";
    const USER_ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn issue_token(secret: &str, sub: &str, portal: &str, expires_in_secs: i64) -> String {
        let now = chrono::Utc::now().timestamp();
        #[allow(clippy::cast_sign_loss)]
        let claims = TokenClaims {
            sub: sub.to_string(),
            portal: portal.to_string(),
            exp: (now + expires_in_secs).max(0) as usize,
            iat: now.max(0) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("encode token")
    }

    async fn setup_db(with_credentials: bool) -> Arc<Database> {
        let db = Database::open(":memory:").await.expect("open database");
        db.run_migrations().await.expect("run migrations");
        users::create_user(
            db.pool(),
            USER_ID.to_string(),
            "z1234567".to_string(),
            "careers-online".to_string(),
        )
        .await
        .expect("create test user");

        if with_credentials {
            let bundle = CredentialBundle::new(vec![SessionCookie {
                name: "session".to_string(),
                value: "abc123".to_string(),
                domain: "careersonline.example.edu".to_string(),
                path: "/".to_string(),
            }]);
            credentials::store(db.pool(), USER_ID, "careers-online", &bundle)
                .await
                .expect("store credentials");
        }

        Arc::new(db)
    }

    fn verifier() -> TokenVerifier {
        TokenVerifier::new(SECRET, 0)
    }

    #[test]
    fn test_verify_valid_token() {
        let token = issue_token(SECRET, USER_ID, "careers-online", 3600);
        let claims = verifier().verify(&token).expect("verify token");
        assert_eq!(claims.sub, USER_ID);
        assert_eq!(claims.portal, "careers-online");
    }

    #[test]
    fn test_verify_expired_token() {
        let token = issue_token(SECRET, USER_ID, "careers-online", -3600);
        let result = verifier().verify(&token);
        assert!(matches!(result, Err(AuthError::Expired)));
    }

    #[test]
    fn test_verify_garbage_token() {
        let result = verifier().verify("not-a-jwt");
        assert!(matches!(result, Err(AuthError::Malformed)));
    }

    #[test]
    fn test_verify_wrong_secret() {
        let token = issue_token("some-other-secret", USER_ID, "careers-online", 3600);
        let result = verifier().verify(&token);
        assert!(matches!(result, Err(AuthError::Malformed)));
    }

    #[test]
    fn test_leeway_tolerates_clock_skew() {
        let token = issue_token(SECRET, USER_ID, "careers-online", -5);
        let lenient = TokenVerifier::new(SECRET, 30);
        assert!(lenient.verify(&token).is_ok());
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let db = setup_db(true).await;
        let auth = Authenticator::new(verifier(), db);

        let token = issue_token(SECRET, USER_ID, "careers-online", 3600);
        let (identity, bundle) = auth.authenticate(&token).await.expect("authenticate");

        assert_eq!(identity.user_id.as_str(), USER_ID);
        assert_eq!(identity.username.as_str(), "z1234567");
        assert_eq!(identity.portal.as_str(), "careers-online");
        assert!(!bundle.is_empty());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let db = setup_db(true).await;
        let auth = Authenticator::new(verifier(), db);

        let token = issue_token(
            SECRET,
            "660e8400-e29b-41d4-a716-446655440000",
            "careers-online",
            3600,
        );
        let result = auth.authenticate(&token).await;
        assert!(matches!(result, Err(AuthError::LookupFailed(_))));
    }

    #[tokio::test]
    async fn test_authenticate_missing_credentials() {
        let db = setup_db(false).await;
        let auth = Authenticator::new(verifier(), db);

        let token = issue_token(SECRET, USER_ID, "careers-online", 3600);
        let result = auth.authenticate(&token).await;
        assert!(matches!(result, Err(AuthError::LookupFailed(_))));
    }

    #[tokio::test]
    async fn test_authenticate_portal_mismatch() {
        let db = setup_db(true).await;
        let auth = Authenticator::new(verifier(), db);

        let token = issue_token(SECRET, USER_ID, "other-portal", 3600);
        let result = auth.authenticate(&token).await;
        assert!(matches!(result, Err(AuthError::LookupFailed(_))));
    }

    #[tokio::test]
    async fn test_authenticate_expired_before_lookup() {
        let db = setup_db(true).await;
        let auth = Authenticator::new(verifier(), db);

        let token = issue_token(SECRET, USER_ID, "careers-online", -3600);
        let result = auth.authenticate(&token).await;
        assert!(matches!(result, Err(AuthError::Expired)));
    }
}
