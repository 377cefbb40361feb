//! Handler for the vendor dashboard summary.

use axum::extract::State;
use contractly_db::models::contract::DashboardSummary;

use crate::engine::ContractLifecycle;
use crate::error::AppResult;
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let summary = ContractLifecycle::new(state.pool).dashboard(&actor).await?;
    Ok(Json(DataResponse { data: summary }))
}
