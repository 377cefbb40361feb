//! Handlers for the `/contracts` resource.

use axum::extract::State;
use axum::http::StatusCode;
use contractly_core::amount::AmountInput;
use contractly_core::content::{generate_or_fallback, ContentRequest, ContentSource};
use contractly_core::contract::ContractInput;
use contractly_core::signature::SignatureInput;
use contractly_core::types::DbId;
use contractly_db::models::contract::{ContractResponse, ContractWithSignature};
use serde::{Deserialize, Serialize};

use crate::engine::ContractLifecycle;
use crate::error::AppResult;
use crate::extract::{Json, Path};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /contracts/assist`: the contract facts plus an
/// optional section to focus on.
#[derive(Debug, Default, Deserialize)]
pub struct AssistRequest {
    #[serde(default, alias = "clientName")]
    pub client_name: Option<String>,
    #[serde(default, alias = "eventDate")]
    pub event_date: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default, alias = "servicePackage")]
    pub service_package: Option<String>,
    #[serde(default)]
    pub amount: Option<AmountInput>,
    #[serde(default)]
    pub section: Option<String>,
}

impl AssistRequest {
    fn contract_input(&self) -> ContractInput {
        ContractInput {
            client_name: self.client_name.clone(),
            event_date: self.event_date.clone(),
            venue: self.venue.clone(),
            service_package: self.service_package.clone(),
            amount: self.amount.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AssistResponse {
    pub content: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/contracts
pub async fn list(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
) -> AppResult<Json<DataResponse<Vec<ContractResponse>>>> {
    let contracts = ContractLifecycle::new(state.pool).list(&actor).await?;
    Ok(Json(DataResponse { data: contracts }))
}

/// POST /api/v1/contracts
pub async fn create(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Json(input): Json<ContractInput>,
) -> AppResult<(StatusCode, Json<DataResponse<ContractResponse>>)> {
    let contract = ContractLifecycle::new(state.pool).create(&actor, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: contract })))
}

/// GET /api/v1/contracts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ContractWithSignature>>> {
    let view = ContractLifecycle::new(state.pool).view(&actor, id).await?;
    Ok(Json(DataResponse { data: view }))
}

/// PUT /api/v1/contracts/{id}
pub async fn update(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ContractInput>,
) -> AppResult<Json<DataResponse<ContractResponse>>> {
    let contract = ContractLifecycle::new(state.pool).update(&actor, id, &input).await?;
    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/v1/contracts/{id}/finalize
pub async fn finalize(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<ContractInput>,
) -> AppResult<Json<DataResponse<ContractResponse>>> {
    let contract = ContractLifecycle::new(state.pool).finalize(&actor, id, &input).await?;
    Ok(Json(DataResponse { data: contract }))
}

/// POST /api/v1/contracts/{id}/sign
pub async fn sign(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SignatureInput>,
) -> AppResult<Json<DataResponse<ContractWithSignature>>> {
    let signed = ContractLifecycle::new(state.pool).sign_input(&actor, id, input).await?;
    Ok(Json(DataResponse { data: signed }))
}

/// POST /api/v1/contracts/assist
///
/// Draft contract content for the vendor. Never fails because of the
/// generation service; failures fall back to the vendor type's template.
pub async fn assist(
    State(state): State<AppState>,
    AuthUser(actor): AuthUser,
    Json(input): Json<AssistRequest>,
) -> AppResult<Json<DataResponse<AssistResponse>>> {
    let fields = input.contract_input().validate()?;

    let request = ContentRequest {
        vendor_type: actor.vendor_type,
        vendor_name: actor.name.clone(),
        client_name: fields.client_name,
        event_date: fields.event_date,
        venue: fields.venue,
        service_package: fields.service_package,
        amount: fields.amount,
        section: input
            .section
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    let generated = generate_or_fallback(state.generator.as_ref(), &request).await;
    match (&generated.source, &generated.failure) {
        (ContentSource::Fallback, Some(failure)) => {
            tracing::warn!(
                vendor_id = actor.user_id,
                vendor_type = %actor.vendor_type,
                error = %failure,
                "Content generation failed; using fallback template",
            );
        }
        _ => {
            tracing::debug!(vendor_id = actor.user_id, "Content generated");
        }
    }

    Ok(Json(DataResponse {
        data: AssistResponse {
            content: generated.content,
        },
    }))
}
