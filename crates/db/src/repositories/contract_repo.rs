//! Repository for the `contracts` table.
//!
//! Every query is scoped by `vendor_id` so a non-owner never sees a row.
//! Writes that change a contract are compare-and-set on `status_id`: the
//! caller states the status it expects and gets `None` back when the row
//! is missing, foreign, or no longer in that status.

use contractly_core::contract::{ContractFields, ContractStatus};
use contractly_core::types::DbId;
use sqlx::PgPool;

use crate::models::contract::{Contract, ContractStats};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, vendor_id, client_name, event_date, venue, service_package, \
                       amount_cents, content, status_id, created_at, updated_at";

/// Provides lifecycle-aware persistence for contracts.
pub struct ContractRepo;

impl ContractRepo {
    /// Insert a new contract for `vendor_id` in the given initial status.
    pub async fn create(
        pool: &PgPool,
        vendor_id: DbId,
        fields: &ContractFields,
        status: ContractStatus,
    ) -> Result<Contract, sqlx::Error> {
        let query = format!(
            "INSERT INTO contracts
                (vendor_id, client_name, event_date, venue, service_package,
                 amount_cents, content, status_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(vendor_id)
            .bind(&fields.client_name)
            .bind(fields.event_date)
            .bind(&fields.venue)
            .bind(&fields.service_package)
            .bind(fields.amount.cents())
            .bind(&fields.content)
            .bind(status.id())
            .fetch_one(pool)
            .await
    }

    /// Find a contract only if it belongs to `vendor_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        vendor_id: DbId,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contracts WHERE id = $1 AND vendor_id = $2");
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(vendor_id)
            .fetch_optional(pool)
            .await
    }

    /// List a vendor's contracts, newest first.
    pub async fn list_for_vendor(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<Vec<Contract>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contracts
             WHERE vendor_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(vendor_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite all business fields and move `expected -> next` in one
    /// conditional update. `expected == next` edits without a transition.
    ///
    /// Returns `None` when no owned row is currently in `expected`.
    pub async fn write_fields(
        pool: &PgPool,
        id: DbId,
        vendor_id: DbId,
        fields: &ContractFields,
        expected: ContractStatus,
        next: ContractStatus,
    ) -> Result<Option<Contract>, sqlx::Error> {
        let query = format!(
            "UPDATE contracts SET
                client_name = $4,
                event_date = $5,
                venue = $6,
                service_package = $7,
                amount_cents = $8,
                content = $9,
                status_id = $10,
                updated_at = NOW()
             WHERE id = $1 AND vendor_id = $2 AND status_id = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contract>(&query)
            .bind(id)
            .bind(vendor_id)
            .bind(expected.id())
            .bind(&fields.client_name)
            .bind(fields.event_date)
            .bind(&fields.venue)
            .bind(&fields.service_package)
            .bind(fields.amount.cents())
            .bind(&fields.content)
            .bind(next.id())
            .fetch_optional(pool)
            .await
    }

    /// Per-status counts plus total and signed value for one vendor.
    pub async fn stats_for_vendor(
        pool: &PgPool,
        vendor_id: DbId,
    ) -> Result<ContractStats, sqlx::Error> {
        sqlx::query_as::<_, ContractStats>(
            "SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status_id = $2) AS drafts,
                COUNT(*) FILTER (WHERE status_id = $3) AS finals,
                COUNT(*) FILTER (WHERE status_id = $4) AS signed,
                COALESCE(SUM(amount_cents), 0)::BIGINT AS total_value_cents,
                COALESCE(SUM(amount_cents) FILTER (WHERE status_id = $4), 0)::BIGINT
                    AS signed_value_cents
             FROM contracts
             WHERE vendor_id = $1",
        )
        .bind(vendor_id)
        .bind(ContractStatus::Draft.id())
        .bind(ContractStatus::Final.id())
        .bind(ContractStatus::Signed.id())
        .fetch_one(pool)
        .await
    }
}
