//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! the user store and the auth primitives.

pub mod auth;
pub mod user;

pub use auth::{AuthService, Session};
pub use user::UserService;
