//! User Registry Backend
//!
//! User registration, login, profile CRUD and password change over a
//! single `users` table.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! - Routes: HTTP request handling and routing
//! - Services: Registration, login and user management rules
//! - Repositories: The `UserStore` trait and its implementations
//! - Database: PostgreSQL with SQLx

use anyhow::Result;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use user_registry_backend::{
    auth::PasswordService,
    config::{self, StorageBackend},
    db,
    repositories::{MemoryUserStore, PgUserStore, UserStore},
    routes,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        "Starting User Registry Backend"
    );

    if config::AppConfig::is_production() {
        if let Err(e) = config.validate_for_production() {
            error!("Configuration error: {}", e);
            anyhow::bail!("Invalid production configuration");
        }
    }

    let (store, pool) = open_store(&config).await?;

    // Unknown-email logins verify against this hash; build it before serving
    if !tokio::task::spawn_blocking(PasswordService::warm_up).await? {
        warn!("Dummy password hash unavailable; unknown-email logins will be faster");
    }

    let state = AppState::new(store, &config);
    let app = routes::create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        info!("Closing database pool");
        pool.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Build the configured user store
///
/// The pool is handed back separately so it can be closed after the
/// server has drained.
async fn open_store(config: &config::AppConfig) -> Result<(Arc<dyn UserStore>, Option<PgPool>)> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            info!("Connecting to database...");
            let pool = db::connect(&config.database).await?;

            // Production runs migrations as a separate job
            if !config::AppConfig::is_production() {
                db::run_migrations(&pool).await?;
            }

            let store: Arc<dyn UserStore> = Arc::new(PgUserStore::new(pool.clone()));
            Ok((store, Some(pool)))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory user store; data is lost on restart");
            let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
            Ok((store, None))
        }
    }
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "user_registry_backend=info,tower_http=info".into()
        } else {
            "user_registry_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        // JSON logging for log aggregation
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
