use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok`, or `degraded` when the contract store is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Liveness plus a round trip to the contract store. Answers 503 while the
/// store is down so load balancers stop routing here.
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let (code, status, db_healthy) = match contractly_db::health_check(&state.pool).await {
        Ok(()) => (StatusCode::OK, "ok", true),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            (StatusCode::SERVICE_UNAVAILABLE, "degraded", false)
        }
    };

    (
        code,
        Json(HealthReport {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }),
    )
}

/// Root-level routes, mounted outside the versioned API prefix.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
