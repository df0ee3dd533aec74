//! Password hashing using bcrypt
//!
//! bcrypt is intentionally CPU-intensive; the async variants move the work
//! onto the blocking thread pool so request tasks are not stalled.

use anyhow::Result;
use once_cell::sync::Lazy;

/// Work factor for new hashes
pub const BCRYPT_COST: u32 = 10;

/// Hash compared against when the account does not exist, so that a
/// failed login costs the same whether or not the email is known.
static DUMMY_HASH: Lazy<Option<String>> =
    Lazy::new(|| bcrypt::hash("dummy-password-for-timing", BCRYPT_COST).ok());

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password on the blocking thread pool
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    ///
    /// A malformed stored hash is an error, not a mismatch.
    pub fn verify(password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password on the blocking thread pool
    pub async fn verify_async(password: String, hash: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hash))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Build the dummy hash ahead of the first unknown-email login
    ///
    /// Blocking; returns whether the hash is available.
    pub fn warm_up() -> bool {
        Lazy::force(&DUMMY_HASH).is_some()
    }

    /// Burn one verification's worth of CPU; the result is discarded
    pub async fn dummy_verify(password: String) {
        let _ = tokio::task::spawn_blocking(move || {
            if let Some(hash) = DUMMY_HASH.as_deref() {
                let _ = bcrypt::verify(password, hash);
            }
        })
        .await;
    }
}
