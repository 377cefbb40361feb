//! Contract entity model and response types.

use chrono::NaiveDate;
use contractly_core::amount::Amount;
use contractly_core::contract::{ContractStatus, StatusId};
use contractly_core::error::CoreError;
use contractly_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::signature::SignatureResponse;

/// Full row from the `contracts` table.
#[derive(Debug, Clone, FromRow)]
pub struct Contract {
    pub id: DbId,
    pub vendor_id: DbId,
    pub client_name: String,
    pub event_date: NaiveDate,
    pub venue: String,
    pub service_package: String,
    pub amount_cents: i64,
    pub content: String,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Contract {
    pub fn status(&self) -> Result<ContractStatus, CoreError> {
        ContractStatus::from_id(self.status_id)
    }

    pub fn amount(&self) -> Result<Amount, CoreError> {
        Amount::from_cents(self.amount_cents)
    }
}

/// Contract as returned by the API. Amount is a decimal string, status a name.
#[derive(Debug, Clone, Serialize)]
pub struct ContractResponse {
    pub id: DbId,
    pub vendor_id: DbId,
    pub client_name: String,
    pub event_date: NaiveDate,
    pub venue: String,
    pub service_package: String,
    pub amount: Amount,
    pub content: String,
    pub status: ContractStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<Contract> for ContractResponse {
    type Error = CoreError;

    fn try_from(row: Contract) -> Result<Self, Self::Error> {
        let status = row.status()?;
        let amount = row.amount()?;
        Ok(Self {
            id: row.id,
            vendor_id: row.vendor_id,
            client_name: row.client_name,
            event_date: row.event_date,
            venue: row.venue,
            service_package: row.service_package,
            amount,
            content: row.content,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// A contract together with its signature, if signed.
#[derive(Debug, Clone, Serialize)]
pub struct ContractWithSignature {
    pub contract: ContractResponse,
    pub signature: Option<SignatureResponse>,
}

/// Aggregate counts and values for one vendor's contracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct ContractStats {
    pub total: i64,
    pub drafts: i64,
    pub finals: i64,
    pub signed: i64,
    pub total_value_cents: i64,
    pub signed_value_cents: i64,
}

/// Dashboard summary as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total: i64,
    pub drafts: i64,
    pub finals: i64,
    pub signed: i64,
    pub total_value: Amount,
    pub signed_value: Amount,
}

impl TryFrom<ContractStats> for DashboardSummary {
    type Error = CoreError;

    fn try_from(stats: ContractStats) -> Result<Self, Self::Error> {
        Ok(Self {
            total: stats.total,
            drafts: stats.drafts,
            finals: stats.finals,
            signed: stats.signed,
            total_value: Amount::from_cents(stats.total_value_cents)?,
            signed_value: Amount::from_cents(stats.signed_value_cents)?,
        })
    }
}
