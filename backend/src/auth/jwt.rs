//! JWT token generation and validation
//!
//! Session tokens are HS256-signed claims carrying the user id. They are
//! stateless: nothing is persisted and there is no revocation.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use user_registry_shared::AuthError;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User ID
    pub id: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Pre-computed JWT keys for efficient token operations
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Keys are derived once and shared behind `Arc`, so cloning into
/// `AppState` is cheap.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    token_expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, token_expiry_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is dead the second after `exp`
        validation.leeway = 0;

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            token_expiry_secs,
        }
    }

    /// Issue a session token for a user, valid from now
    #[inline]
    pub fn generate_token(&self, user_id: i64) -> Result<String> {
        self.generate_token_at(user_id, Utc::now())
    }

    /// Issue a session token as if it had been issued at `issued_at`
    pub fn generate_token_at(&self, user_id: i64, issued_at: DateTime<Utc>) -> Result<String> {
        let exp = issued_at + Duration::seconds(self.token_expiry_secs);

        let claims = Claims {
            id: user_id,
            iat: issued_at.timestamp(),
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Verify signature and expiry, returning the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, self.keys.decoding(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }

    /// Token lifetime in seconds
    #[inline]
    pub fn token_expiry_secs(&self) -> i64 {
        self.token_expiry_secs
    }
}
