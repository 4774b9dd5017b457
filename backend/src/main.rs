//! PillPath customer auth server
//!
//! Serves `POST /api/auth/register` and `POST /api/auth/login` over a
//! PostgreSQL customer store. Startup aborts when the database
//! credentials or the JWT secret are missing.

use anyhow::{Context, Result};
use pillpath_backend::{config::AppConfig, db, routes, state::AppState};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let production = AppConfig::is_production();
    init_tracing(production);

    let config = AppConfig::load()
        .context("invalid configuration (DB_USERNAME, DB_PASSWORD and JWT_SECRET are required)")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        production,
        "Starting PillPath customer auth"
    );

    serve(config, production).await
}

/// Pretty logs for development, JSON lines in production
fn init_tracing(production: bool) {
    let default_filter = if production {
        "pillpath_backend=info,tower_http=info"
    } else {
        "pillpath_backend=debug,tower_http=debug,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if production {
        builder.json().init();
    } else {
        builder.pretty().init();
    }
}

async fn serve(config: AppConfig, production: bool) -> Result<()> {
    if production && matches!(config.database.host.as_str(), "localhost" | "127.0.0.1") {
        warn!(host = %config.database.host, "Production database is on the loopback interface");
    }

    let pool = db::create_pool(&config.database)
        .await
        .context("failed to connect to the customer database")?;

    // Production schemas are migrated by a separate job
    if !production {
        db::run_migrations(&pool).await?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = routes::create_router(AppState::with_postgres(pool, config)?);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C, or SIGTERM where available
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    let _ = tokio::signal::ctrl_c().await;

    info!("Shutdown requested, draining connections");
}
