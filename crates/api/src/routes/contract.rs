//! Route definitions for the `/contracts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::contract;
use crate::state::AppState;

/// Routes mounted at `/contracts`. All require auth.
///
/// ```text
/// GET  /                 -> list
/// POST /                 -> create
/// POST /assist           -> assist
/// GET  /{id}             -> get_by_id
/// PUT  /{id}             -> update
/// POST /{id}/finalize    -> finalize
/// POST /{id}/sign        -> sign
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contract::list).post(contract::create))
        .route("/assist", post(contract::assist))
        .route("/{id}", get(contract::get_by_id).put(contract::update))
        .route("/{id}/finalize", post(contract::finalize))
        .route("/{id}/sign", post(contract::sign))
}
