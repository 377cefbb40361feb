pub mod auth;
pub mod contract;
pub mod dashboard;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                      login (public)
/// /auth/logout                     logout (public)
/// /auth/me                         current vendor (requires auth)
///
/// /contracts                       list, create (GET, POST)
/// /contracts/assist                draft content (POST)
/// /contracts/{id}                  view, update (GET, PUT)
/// /contracts/{id}/finalize         draft -> final (POST)
/// /contracts/{id}/sign             final -> signed (POST)
///
/// /dashboard                       vendor summary (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, logout, me).
        .nest("/auth", auth::router())
        // Contract lifecycle.
        .nest("/contracts", contract::router())
        // Per-vendor summary.
        .nest("/dashboard", dashboard::router())
}
