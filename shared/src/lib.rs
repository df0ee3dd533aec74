//! User Registry Shared Library
//!
//! Types shared between the backend and its clients: the user model,
//! request/response bodies, authentication error kinds and input
//! normalisation helpers.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use models::User;
pub use types::*;
