//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! The state is built once in `main` and is read-only afterwards. Every
//! field is cheap to clone (`Arc` or `Arc`-backed).

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::UserStore;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// User store injected at startup
    pub store: Arc<dyn UserStore>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys from the configured secret; call once at
    /// startup.
    pub fn new(store: Arc<dyn UserStore>, config: &AppConfig) -> Self {
        let jwt = JwtService::new(&config.jwt.secret, config.jwt.token_expiry_secs);

        Self { store, jwt }
    }

    /// Get a reference to the user store
    #[inline]
    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    /// Get a reference to the JWT service
    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
