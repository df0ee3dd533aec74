//! Error types for the User Registry

use thiserror::Error;

/// Authentication error types
///
/// Every variant is reported to clients as 401; the distinction only
/// matters for server-side logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Missing token")]
    MissingToken,
}
