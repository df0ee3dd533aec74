//! Authentication module
//!
//! Provides JWT session tokens, bcrypt password hashing and the
//! middleware that guards protected routes.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{extract_bearer_token, require_auth, CurrentUser};
pub use password::{PasswordService, BCRYPT_COST};
