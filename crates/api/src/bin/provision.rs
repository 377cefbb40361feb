//! Provision the demo vendor accounts into the configured database.
//!
//! Applies pending migrations first so it can run against a fresh database.

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "contractly_api=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = contractly_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    contractly_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let report = contractly_api::provision::provision_demo_vendors(&pool)
        .await
        .context("Failed to provision demo vendors")?;

    tracing::info!(
        inserted = report.inserted,
        skipped = report.skipped,
        "Provisioning complete"
    );
    pool.close().await;
    Ok(())
}
