use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use contractly_api::auth::identity::JwtIdentityCheck;
use contractly_api::config::ServerConfig;
use contractly_api::generation::build_generator;
use contractly_api::router::build_app_router;
use contractly_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contractly_api=debug,contractly_db=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    let addr = config.bind_addr().context("HOST must be an IP address")?;
    tracing::info!(
        %addr,
        generation_enabled = config.generation.api_key.is_some(),
        "Loaded contract service configuration",
    );

    let pool = contractly_db::create_pool(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    contractly_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    contractly_db::run_migrations(&pool)
        .await
        .context("Failed to apply contract store migrations")?;
    tracing::info!("Contract store ready");

    let generator = build_generator(&config.generation)
        .context("Failed to build content generation client")?;
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        identity: Arc::new(JwtIdentityCheck::new(config.jwt.clone())),
        generator,
    };
    let app = build_app_router(state, &config);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Contract service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(drain, pool.close()).await.is_err() {
        tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Database pool did not close in time",
        );
    }
    tracing::info!("Contract service stopped");
    Ok(())
}

/// Resolves on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, draining requests"),
        () = terminate => tracing::info!("Received SIGTERM, draining requests"),
    }
}
