//! Repository for the `signatures` table.

use contractly_core::contract::ContractStatus;
use contractly_core::signature::SignaturePayload;
use contractly_core::types::DbId;
use sqlx::PgPool;

use crate::models::signature::Signature;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, contract_id, mode, data, captured_at";

/// Provides signature lookup and the atomic sign write.
pub struct SignatureRepo;

impl SignatureRepo {
    /// Find the signature attached to a contract, if any.
    pub async fn find_by_contract(
        pool: &PgPool,
        contract_id: DbId,
    ) -> Result<Option<Signature>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM signatures WHERE contract_id = $1");
        sqlx::query_as::<_, Signature>(&query)
            .bind(contract_id)
            .fetch_optional(pool)
            .await
    }

    /// Flip an owned `final` contract to `signed` and insert its signature
    /// in one transaction.
    ///
    /// The conditional update takes the row lock, so a concurrent signer
    /// waits and then matches nothing. Returns `None` when no owned row is
    /// currently `final`; nothing is written in that case. A duplicate
    /// signature surfaces as a `uq_signatures_contract_id` violation.
    pub async fn sign(
        pool: &PgPool,
        contract_id: DbId,
        vendor_id: DbId,
        payload: &SignaturePayload,
    ) -> Result<Option<Signature>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let flipped = sqlx::query(
            "UPDATE contracts SET status_id = $3, updated_at = NOW()
             WHERE id = $1 AND vendor_id = $2 AND status_id = $4",
        )
        .bind(contract_id)
        .bind(vendor_id)
        .bind(ContractStatus::Signed.id())
        .bind(ContractStatus::Final.id())
        .execute(&mut *tx)
        .await?;

        if flipped.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let insert_query = format!(
            "INSERT INTO signatures (contract_id, mode, data)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let signature = sqlx::query_as::<_, Signature>(&insert_query)
            .bind(contract_id)
            .bind(payload.mode.as_str())
            .bind(&payload.data)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(signature))
    }
}
