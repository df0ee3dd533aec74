//! Data models for the User Registry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// User account
///
/// `password_hash` is the bcrypt output and is never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
