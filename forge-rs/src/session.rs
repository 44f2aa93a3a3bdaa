//! Session tokens
//!
//! Signed, expiring bearer tokens (HS256) binding a session to an account
//! email. Resolution is best-effort: any malformed, tampered or expired
//! token yields `None` and the caller degrades to the guest identity.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::error::Result;

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (email address)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at (Unix timestamp)
    pub iat: u64,
}

/// Session token issuer/resolver
#[derive(Clone)]
pub struct SessionTokens {
    secret: String,
    expiration: Duration,
}

impl SessionTokens {
    /// Create a token issuer with the given signing secret and lifetime
    pub fn new(secret: String, expiration_hours: u64) -> Self {
        Self {
            secret,
            expiration: Duration::from_secs(expiration_hours * 3600),
        }
    }

    /// Issue a signed token for an email
    pub fn issue(&self, email: &str) -> Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();

        let claims = Claims {
            sub: email.to_string(),
            exp: now + self.expiration.as_secs(),
            iat: now,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Resolve a token back to its email
    ///
    /// Whether the email still names a live account is the caller's concern.
    pub fn resolve(&self, token: &str) -> Option<String> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .ok()
        .map(|data| data.claims.sub)
    }
}

impl Default for SessionTokens {
    fn default() -> Self {
        Self::new("change-me-in-production".to_string(), 24)
    }
}
