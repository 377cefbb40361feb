//! The `draft -> final -> signed` state machine over the contract store.
//!
//! Checks run in a fixed order: existence and ownership (`NotFound`), then
//! status (`InvalidState` / `AlreadyExists`), then input validation. The
//! write itself is a compare-and-set on the expected status; when it matches
//! nothing, the contract is re-read so a caller that lost a race gets the
//! error matching the state the winner left behind.

use contractly_core::contract::{ContractInput, ContractStatus};
use contractly_core::error::CoreError;
use contractly_core::identity::Identity;
use contractly_core::signature::{SignatureInput, SignaturePayload};
use contractly_core::types::DbId;
use contractly_db::models::contract::{
    Contract, ContractResponse, ContractWithSignature, DashboardSummary,
};
use contractly_db::models::signature::SignatureResponse;
use contractly_db::repositories::{ContractRepo, SignatureRepo};
use sqlx::PgPool;

use crate::error::{is_unique_violation, AppError, AppResult};

const CONTRACT: &str = "Contract";
const SIGNATURE_UNIQUE: &str = "uq_signatures_contract_id";

/// Lifecycle operations for one vendor's contracts.
pub struct ContractLifecycle {
    pool: PgPool,
}

impl ContractLifecycle {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// A contract and its signature, if owned by `actor`.
    pub async fn view(&self, actor: &Identity, id: DbId) -> AppResult<ContractWithSignature> {
        let contract = self.load_owned(actor, id).await?;
        let signature = SignatureRepo::find_by_contract(&self.pool, id)
            .await?
            .map(SignatureResponse::try_from)
            .transpose()?;
        Ok(ContractWithSignature {
            contract: contract.try_into()?,
            signature,
        })
    }

    /// All of `actor`'s contracts, newest first.
    pub async fn list(&self, actor: &Identity) -> AppResult<Vec<ContractResponse>> {
        let rows = ContractRepo::list_for_vendor(&self.pool, actor.user_id).await?;
        rows.into_iter()
            .map(|row| ContractResponse::try_from(row).map_err(AppError::from))
            .collect()
    }

    /// Per-status counts and contract values for `actor`.
    pub async fn dashboard(&self, actor: &Identity) -> AppResult<DashboardSummary> {
        let stats = ContractRepo::stats_for_vendor(&self.pool, actor.user_id).await?;
        Ok(stats.try_into()?)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create a contract in `draft`, or directly in `final` when the input
    /// carries the finalize flag.
    pub async fn create(&self, actor: &Identity, input: &ContractInput) -> AppResult<ContractResponse> {
        let fields = input.validate()?;
        let status = input.initial_status();

        let row = ContractRepo::create(&self.pool, actor.user_id, &fields, status).await?;
        tracing::info!(
            contract_id = row.id,
            vendor_id = actor.user_id,
            status = %status,
            "Contract created",
        );
        Ok(row.try_into()?)
    }

    /// Overwrite a draft's business fields. Status is unchanged.
    pub async fn update(
        &self,
        actor: &Identity,
        id: DbId,
        input: &ContractInput,
    ) -> AppResult<ContractResponse> {
        let current = self.load_owned(actor, id).await?;
        current.status()?.ensure_editable()?;
        let fields = input.validate()?;

        let written = ContractRepo::write_fields(
            &self.pool,
            id,
            actor.user_id,
            &fields,
            ContractStatus::Draft,
            ContractStatus::Draft,
        )
        .await?;

        match written {
            Some(row) => {
                tracing::debug!(contract_id = id, vendor_id = actor.user_id, "Contract updated");
                Ok(row.try_into()?)
            }
            None => Err(self.reclassify_draft_miss(actor, id, ContractStatus::ensure_editable).await),
        }
    }

    /// Save the final fields and move `draft -> final`. Irreversible.
    pub async fn finalize(
        &self,
        actor: &Identity,
        id: DbId,
        input: &ContractInput,
    ) -> AppResult<ContractResponse> {
        let current = self.load_owned(actor, id).await?;
        current.status()?.ensure_can_finalize()?;
        let fields = input.validate()?;

        let written = ContractRepo::write_fields(
            &self.pool,
            id,
            actor.user_id,
            &fields,
            ContractStatus::Draft,
            ContractStatus::Final,
        )
        .await?;

        match written {
            Some(row) => {
                tracing::info!(
                    contract_id = id,
                    vendor_id = actor.user_id,
                    status = %ContractStatus::Final,
                    "Contract finalized",
                );
                Ok(row.try_into()?)
            }
            None => {
                Err(self
                    .reclassify_draft_miss(actor, id, ContractStatus::ensure_can_finalize)
                    .await)
            }
        }
    }

    /// Attach a captured signature and move `final -> signed`.
    pub async fn sign(
        &self,
        actor: &Identity,
        id: DbId,
        payload: &SignaturePayload,
    ) -> AppResult<ContractWithSignature> {
        self.sign_with(actor, id, || {
            payload.validate()?;
            Ok(payload.clone())
        })
        .await
    }

    /// [`Self::sign`] for a payload still in wire form. The payload is only
    /// parsed once existence and status checks have passed.
    pub async fn sign_input(
        &self,
        actor: &Identity,
        id: DbId,
        input: SignatureInput,
    ) -> AppResult<ContractWithSignature> {
        self.sign_with(actor, id, move || input.into_payload()).await
    }

    async fn sign_with(
        &self,
        actor: &Identity,
        id: DbId,
        payload: impl FnOnce() -> Result<SignaturePayload, CoreError>,
    ) -> AppResult<ContractWithSignature> {
        let current = self.load_owned(actor, id).await?;
        let has_signature = SignatureRepo::find_by_contract(&self.pool, id).await?.is_some();
        current.status()?.ensure_can_sign(has_signature)?;
        let payload = payload()?;

        let signature = match SignatureRepo::sign(&self.pool, id, actor.user_id, &payload).await {
            Ok(Some(signature)) => signature,
            Ok(None) => return Err(self.reclassify_sign_miss(actor, id).await),
            Err(e) if is_unique_violation(&e, SIGNATURE_UNIQUE) => {
                return Err(already_signed());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            contract_id = id,
            vendor_id = actor.user_id,
            status = %ContractStatus::Signed,
            mode = %payload.mode,
            "Contract signed",
        );

        // The flip and insert committed together, so the row is signed now.
        let contract = self.load_owned(actor, id).await?;
        Ok(ContractWithSignature {
            contract: contract.try_into()?,
            signature: Some(signature.try_into()?),
        })
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn load_owned(&self, actor: &Identity, id: DbId) -> AppResult<Contract> {
        ContractRepo::find_owned(&self.pool, id, actor.user_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: CONTRACT, id }))
    }

    /// Explain why a draft-guarded write matched no row.
    async fn reclassify_draft_miss(
        &self,
        actor: &Identity,
        id: DbId,
        check: fn(ContractStatus) -> Result<(), CoreError>,
    ) -> AppError {
        let current = match self.load_owned(actor, id).await {
            Ok(row) => row,
            Err(e) => return e,
        };
        match current.status().and_then(check) {
            Err(e) => {
                tracing::debug!(contract_id = id, error = %e, "Lost concurrent write");
                e.into()
            }
            Ok(()) => AppError::InternalError(format!(
                "Conditional write on contract {id} matched no row"
            )),
        }
    }

    /// Explain why the sign write matched no row.
    async fn reclassify_sign_miss(&self, actor: &Identity, id: DbId) -> AppError {
        let current = match self.load_owned(actor, id).await {
            Ok(row) => row,
            Err(e) => return e,
        };
        let has_signature = match SignatureRepo::find_by_contract(&self.pool, id).await {
            Ok(found) => found.is_some(),
            Err(e) => return e.into(),
        };
        match current.status().and_then(|s| s.ensure_can_sign(has_signature)) {
            Err(e) => {
                tracing::debug!(contract_id = id, error = %e, "Lost concurrent sign");
                e.into()
            }
            Ok(()) => AppError::InternalError(format!(
                "Conditional sign on contract {id} matched no row"
            )),
        }
    }
}

fn already_signed() -> AppError {
    AppError::Core(CoreError::AlreadyExists(
        "Contract is already signed".to_string(),
    ))
}
